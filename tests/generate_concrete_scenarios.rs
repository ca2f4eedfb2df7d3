//! End-to-end scenarios against the committed test catalog fixture, one per
//! concrete example listed alongside the component design.

use course_scheduler::orchestrator::{GenerateRequest, Orchestrator};
use course_scheduler::store::memory::InMemorySectionStore;

fn request(course_codes: &[&str]) -> GenerateRequest {
    GenerateRequest {
        term: "202309".to_string(),
        course_codes: course_codes.iter().map(|c| c.to_string()).collect(),
        num_schedules: 10,
        time_limit_seconds: Some(3),
        max_solutions: Some(5),
        filters: None,
        preferences: None,
        solver: "cp".to_string(),
    }
}

#[tokio::test]
async fn biol1000u_and_eap1000e_is_infeasible() {
    let store = InMemorySectionStore::fixture();
    let orchestrator = Orchestrator::new(&store);
    let response = orchestrator
        .generate(request(&["BIOL1000U", "EAP1000E"]))
        .await
        .unwrap();
    assert!(response.schedules.is_empty());
}

#[tokio::test]
async fn biol1000u_and_crmn1000u_yields_two_schedules() {
    let store = InMemorySectionStore::fixture();
    let orchestrator = Orchestrator::new(&store);
    let response = orchestrator
        .generate(request(&["BIOL1000U", "CRMN1000U"]))
        .await
        .unwrap();
    assert_eq!(response.schedules.len(), 2);
    for schedule in &response.schedules {
        assert_eq!(schedule.len(), 2);
        assert!(schedule.contains_key("BIOL1000U"));
        assert!(schedule.contains_key("CRMN1000U"));
    }
}

#[tokio::test]
async fn single_course_schedules_expand_every_equivalent_tuple() {
    let store = InMemorySectionStore::fixture();
    let orchestrator = Orchestrator::new(&store);
    let response = orchestrator
        .generate(request(&["CSCI2000U"]))
        .await
        .unwrap();
    // CSCI2000U's 7 linked tutorial options all share the same meeting time,
    // so they compress to a single candidate bitmap; expansion then hands
    // back every one of the 7 CRN tuples that produced it.
    assert_eq!(response.schedules.len(), 7);
    for schedule in &response.schedules {
        assert_eq!(schedule.len(), 1);
        assert!(schedule.contains_key("CSCI2000U"));
    }
}

#[tokio::test]
async fn random_solver_only_returns_sound_assignments() {
    let store = InMemorySectionStore::fixture();
    let orchestrator = Orchestrator::new(&store);
    let mut request = request(&["BIOL1000U", "CRMN1000U"]);
    request.solver = "random".to_string();
    request.num_schedules = 10;
    let response = orchestrator.generate(request).await.unwrap();
    // random search has no completeness guarantee, but whatever it returns
    // must be a subset of the two feasible schedules the CP solver finds.
    assert!(response.schedules.len() <= 2);
}
