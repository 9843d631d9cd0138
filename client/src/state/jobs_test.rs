use super::*;

fn job(id: &str, status: JobStatus, posted_by: &str) -> Job {
    Job {
        id: id.to_owned(),
        title: format!("Shift {id}"),
        description: String::new(),
        status,
        posted_by: Some(posted_by.to_owned()),
        accepted_by: None,
        location: None,
        rate: None,
    }
}

fn state() -> JobsState {
    let mut state = JobsState::default();
    state.jobs.receive(vec![
        job("j1", JobStatus::Open, "clinic-a"),
        job("j2", JobStatus::Accepted, "clinic-b"),
        job("j3", JobStatus::Open, "clinic-a"),
    ]);
    state
}

#[test]
fn open_jobs_filters_by_status() {
    let state = state();
    let ids: Vec<&str> = state.open_jobs().iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, vec!["j1", "j3"]);
}

#[test]
fn posted_by_filters_by_owner() {
    let state = state();
    assert_eq!(state.posted_by("clinic-a").len(), 2);
    assert_eq!(state.posted_by("nobody").len(), 0);
}

#[test]
fn accept_allows_one_request_at_a_time() {
    let mut state = state();
    assert!(state.begin_accept("j1"));
    assert!(!state.begin_accept("j3"));
    state.finish_accept(None);
    assert!(state.begin_accept("j3"));
}

#[test]
fn accept_is_refused_for_non_open_or_unknown_jobs() {
    let mut state = state();
    assert!(!state.begin_accept("j2"));
    assert!(!state.begin_accept("missing"));
    assert_eq!(state.accepting, None);
}

#[test]
fn finished_accept_applies_backend_copy() {
    let mut state = state();
    state.begin_accept("j1");
    let mut accepted = job("j1", JobStatus::Accepted, "clinic-a");
    accepted.accepted_by = Some("dr-who".to_owned());
    state.finish_accept(Some(accepted));
    assert_eq!(state.accepting, None);
    assert_eq!(state.jobs.get("j1").map(|j| j.status), Some(JobStatus::Accepted));
    assert_eq!(state.open_jobs().len(), 1);
}
