//! End-to-end flows through the public API: fetch, search, sort on the
//! worker, and the generation checks that drop superseded results.

use covidash::api::{response_event, SummaryRequest};
use covidash::worker::{CovidashWorker, WorkerResponse};
use covidash::{handle_event, initialize, Action, Config, Event, FetchStatus, InputMode, Screen};

const BODY: &str = r#"{
    "ID": "abc",
    "Message": "",
    "Global": {
        "NewConfirmed": 10, "TotalConfirmed": 6000,
        "NewDeaths": 1, "TotalDeaths": 300,
        "NewRecovered": 5, "TotalRecovered": 2500,
        "Date": "2020-05-01T00:00:00Z"
    },
    "Countries": [
        {"Country": "Germany", "CountryCode": "DE", "Slug": "germany",
         "TotalConfirmed": 1000, "TotalDeaths": 50, "TotalRecovered": 800,
         "Date": "2020-05-01T00:00:00Z"},
        {"Country": "Georgia", "CountryCode": "GE", "Slug": "georgia",
         "TotalConfirmed": 200, "TotalDeaths": 5, "TotalRecovered": 100,
         "Date": "2020-05-01T00:00:00Z"},
        {"Country": "France", "CountryCode": "FR", "Slug": "france",
         "TotalConfirmed": 3000, "TotalDeaths": 200, "TotalRecovered": 1000,
         "Date": "2020-05-01T00:00:00Z"},
        {"Country": "Italy", "CountryCode": "IT", "Slug": "italy",
         "TotalConfirmed": 1800, "TotalDeaths": 45, "TotalRecovered": 600,
         "Date": "2020-05-01T00:00:00Z"}
    ],
    "Date": "2020-05-01T00:00:00Z"
}"#;

fn names(state: &covidash::AppState) -> Vec<&str> {
    state.visible_countries().iter().map(|c| c.country.as_str()).collect()
}

fn fetch_generation(actions: &[Action]) -> u64 {
    match actions {
        [Action::FetchSummary { generation, .. }] => *generation,
        other => panic!("expected a single fetch, got {other:?}"),
    }
}

/// Grants permission and feeds the fetched body back as a web response.
fn loaded_state() -> covidash::AppState {
    let mut state = initialize(&Config::default());
    let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
    let generation = fetch_generation(&actions);

    let event = response_event(200, BODY.as_bytes(), &SummaryRequest { generation }.to_context()).unwrap();
    let (render, actions) = handle_event(&mut state, &event).unwrap();
    assert!(render);
    assert!(actions.is_empty());
    state
}

/// Runs every posted sort through a real worker and feeds the responses back.
fn run_worker(state: &mut covidash::AppState, actions: Vec<Action>) {
    let mut worker = CovidashWorker::default();
    for action in actions {
        if let Action::PostToWorker(message) = action {
            let payload = serde_json::to_string(&message).unwrap();
            let response = worker.handle_payload(&payload).unwrap();
            let response: WorkerResponse = serde_json::from_str(&response).unwrap();
            handle_event(state, &Event::WorkerResponse(response)).unwrap();
        }
    }
}

#[test]
fn fetch_populates_home_and_countries() {
    let state = loaded_state();
    assert_eq!(state.fetch_status, FetchStatus::Loaded);

    let top: Vec<_> = state.top_countries.iter().map(|c| c.country.as_str()).collect();
    assert_eq!(top, ["France", "Italy", "Germany", "Georgia"]);
    assert_eq!(names(&state), ["Germany", "Georgia", "France", "Italy"]);
}

#[test]
fn error_status_marks_fetch_failed() {
    let mut state = initialize(&Config::default());
    let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
    let generation = fetch_generation(&actions);

    let event = response_event(503, b"", &SummaryRequest { generation }.to_context()).unwrap();
    handle_event(&mut state, &event).unwrap();
    assert!(matches!(state.fetch_status, FetchStatus::Failed(_)));
    assert!(state.summary.is_none());
}

#[test]
fn superseded_fetch_is_ignored() {
    let mut state = loaded_state();
    let (_, first) = handle_event(&mut state, &Event::Refresh).unwrap();
    let (_, second) = handle_event(&mut state, &Event::Refresh).unwrap();
    let stale = fetch_generation(&first);
    assert_eq!(fetch_generation(&second), stale + 1);

    let event = response_event(500, b"", &SummaryRequest { generation: stale }.to_context()).unwrap();
    let (render, _) = handle_event(&mut state, &event).unwrap();
    assert!(!render);
    assert_eq!(state.fetch_status, FetchStatus::Refreshing);
}

#[test]
fn search_then_sort_through_worker() {
    let mut state = loaded_state();
    handle_event(&mut state, &Event::Confirm).unwrap();
    assert_eq!(state.screen, Screen::Countries);

    handle_event(&mut state, &Event::SearchMode).unwrap();
    assert_eq!(state.input_mode, InputMode::Search);
    let mut timers = 0;
    for c in "ge".chars() {
        let (_, actions) = handle_event(&mut state, &Event::Char(c)).unwrap();
        timers += actions.len();
    }
    assert_eq!(timers, 2);

    // Only the last timer applies the keyword.
    handle_event(&mut state, &Event::Timer).unwrap();
    assert_eq!(state.search_keyword, "");
    handle_event(&mut state, &Event::Timer).unwrap();
    assert_eq!(state.search_keyword, "ge");
    assert_eq!(names(&state), ["Germany", "Georgia"]);

    handle_event(&mut state, &Event::SubmitSearch).unwrap();
    let (_, actions) = handle_event(&mut state, &Event::Sort(covidash::SortKey::TotalConfirmed)).unwrap();
    assert!(state.is_sorting);
    run_worker(&mut state, actions);
    assert!(!state.is_sorting);
    assert_eq!(names(&state), ["Georgia", "Germany"]);

    let (_, actions) = handle_event(&mut state, &Event::Sort(covidash::SortKey::TotalConfirmed)).unwrap();
    run_worker(&mut state, actions);
    assert_eq!(names(&state), ["Germany", "Georgia"]);
}

#[test]
fn stale_sort_result_is_discarded() {
    let mut state = loaded_state();
    handle_event(&mut state, &Event::Confirm).unwrap();

    let (_, first) = handle_event(&mut state, &Event::Sort(covidash::SortKey::TotalDeaths)).unwrap();
    let (_, second) = handle_event(&mut state, &Event::Sort(covidash::SortKey::TotalDeaths)).unwrap();

    // The ascending result arrives after the descending request was sent.
    run_worker(&mut state, first);
    assert!(state.is_sorting);
    assert_eq!(names(&state), ["Germany", "Georgia", "France", "Italy"]);

    run_worker(&mut state, second);
    assert_eq!(names(&state), ["France", "Germany", "Italy", "Georgia"]);
}

#[test]
fn malformed_worker_payload_unblocks_sorting() {
    let mut state = loaded_state();
    handle_event(&mut state, &Event::Confirm).unwrap();
    handle_event(&mut state, &Event::Sort(covidash::SortKey::TotalRecovered)).unwrap();
    assert!(state.is_sorting);

    let response = CovidashWorker::default().handle_payload("not json").unwrap();
    let response: WorkerResponse = serde_json::from_str(&response).unwrap();
    assert!(matches!(response, WorkerResponse::Error { .. }));

    handle_event(&mut state, &Event::WorkerResponse(response)).unwrap();
    assert!(!state.is_sorting);
}
