//! Background fetches.
//!
//! Each fetch runs as a tokio task and reports back through an unbounded
//! channel that the UI loop drains between frames. Only the UI loop
//! touches [`App`](super::App), so results are applied in arrival order on
//! a single thread.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::requests::{AppEvent, CityRequest, StatesRequest};
use crate::infrastructure::LocalityClient;

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

pub fn spawn_states_fetch(
    client: LocalityClient,
    request: StatesRequest,
    events: EventSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client.list_states(&request.abort).await;
        if events.send(AppEvent::States(request.complete(result))).is_err() {
            tracing::debug!("event channel closed, dropping state list");
        }
    })
}

/// Runs a city fetch. The request's loading guard rides along in the
/// outcome; if the UI is gone the outcome is dropped here and the guard
/// with it.
pub fn spawn_cities_fetch(
    client: LocalityClient,
    request: CityRequest,
    events: EventSender,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client.list_cities(&request.uf, &request.abort).await;
        if events.send(AppEvent::Cities(request.complete(result))).is_err() {
            tracing::debug!("event channel closed, dropping cities");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{App, CityView};
    use crate::domain::State;
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const STATES: &str = r#"[
        {"id": 35, "sigla": "SP", "nome": "São Paulo"},
        {"id": 33, "sigla": "RJ", "nome": "Rio de Janeiro"}
    ]"#;

    const CITIES: &str = r#"[
        {"id": 3, "nome": "Vitória", "municipio": {"microrregiao": {"nome": "Vitória"}}},
        {"id": 1, "nome": "Abadia", "municipio": {"microrregiao": {"nome": "Goiânia"}}},
        {"id": 2, "nome": "Éden", "municipio": {"microrregiao": {"nome": "Sertão"}}}
    ]"#;

    async fn server_with(route: &str, template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    fn client_for(server: &MockServer) -> LocalityClient {
        LocalityClient::new(Url::parse(&server.uri()).unwrap()).unwrap()
    }

    async fn next_event(rx: &mut EventReceiver) -> AppEvent {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("fetch should report back")
            .expect("channel open")
    }

    fn app_with_selection() -> App {
        let mut app = App::default();
        let request = app.begin_state_load().unwrap();
        app.apply_states(request.complete(Ok(vec![State::new(35, "SP", "São Paulo")])));
        app.select_state("SP");
        app
    }

    #[tokio::test]
    async fn test_states_fetch_populates_dropdown() {
        let server = server_with(
            "/estados",
            ResponseTemplate::new(200).set_body_string(STATES),
        )
        .await;
        let (tx, mut rx) = event_channel();
        let mut app = App::default();

        let request = app.begin_state_load().unwrap();
        spawn_states_fetch(client_for(&server), request, tx);
        app.apply_event(next_event(&mut rx).await);

        let labels: Vec<&str> = app.options().iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["Selecione um estado", "São Paulo", "Rio de Janeiro"]);
    }

    #[tokio::test]
    async fn test_cities_fetch_sorts_and_clears_loading() {
        let server = server_with(
            "/estados/SP/distritos",
            ResponseTemplate::new(200).set_body_string(CITIES),
        )
        .await;
        let (tx, mut rx) = event_channel();
        let mut app = app_with_selection();

        let request = app.confirm_selection().unwrap();
        spawn_cities_fetch(client_for(&server), request, tx);
        assert_eq!(app.city_view(), CityView::Loading);

        app.apply_event(next_event(&mut rx).await);

        assert!(!app.is_loading());
        let names: Vec<&str> = app.cities().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Abadia", "Éden", "Vitória"]);
    }

    #[tokio::test]
    async fn test_failed_cities_fetch_clears_loading() {
        let server = server_with(
            "/estados/SP/distritos",
            ResponseTemplate::new(503),
        )
        .await;
        let (tx, mut rx) = event_channel();
        let mut app = app_with_selection();

        let request = app.confirm_selection().unwrap();
        spawn_cities_fetch(client_for(&server), request, tx);
        app.apply_event(next_event(&mut rx).await);

        assert!(!app.is_loading());
        assert_eq!(app.city_view(), CityView::Empty);
        assert!(app.can_confirm());
    }

    #[tokio::test]
    async fn test_closed_channel_still_clears_loading() {
        let server = server_with(
            "/estados/SP/distritos",
            ResponseTemplate::new(200).set_body_string(CITIES),
        )
        .await;
        let (tx, rx) = event_channel();
        drop(rx);
        let mut app = app_with_selection();

        let request = app.confirm_selection().unwrap();
        spawn_cities_fetch(client_for(&server), request, tx)
            .await
            .unwrap();

        assert!(!app.is_loading());
        assert!(app.cities().is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_mid_fetch_is_a_no_op() {
        let server = server_with(
            "/estados/SP/distritos",
            ResponseTemplate::new(200)
                .set_body_string(CITIES)
                .set_delay(Duration::from_secs(30)),
        )
        .await;
        let (tx, mut rx) = event_channel();
        let mut app = app_with_selection();

        let request = app.confirm_selection().unwrap();
        let handle = spawn_cities_fetch(client_for(&server), request, tx);
        app.shutdown();

        let event = next_event(&mut rx).await;
        app.apply_event(event);
        handle.await.unwrap();

        assert!(!app.is_loading());
        assert!(app.cities().is_empty());
    }
}
