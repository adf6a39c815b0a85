//! Backend client behavior against a mock REST server.

use folio::config::BackendSettings;
use folio::domain::types::ExperienceCategory;
use folio::infra::backend::BackendClient;
use httpmock::prelude::*;
use serde_json::json;
use url::Url;

fn client_for(server: &MockServer) -> BackendClient {
    let settings = BackendSettings {
        url: Url::parse(&server.base_url()).expect("mock server URL parses"),
        api_key: "test-anon-key".to_string(),
    };
    BackendClient::new(&settings).expect("client builds")
}

#[tokio::test]
async fn fetches_skills_with_select_and_order_params() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/skill")
            .query_param("select", "*")
            .query_param("order", "id.asc")
            .header("apikey", "test-anon-key")
            .header("authorization", "Bearer test-anon-key");
        then.status(200).json_body(json!([
            {"id": 1, "name": "Rust", "category": "languages", "is_highlight": true},
            {"id": 2, "name": "Postgres", "category": "databases", "is_highlight": false}
        ]));
    });

    let skills = client_for(&server).skills().await.expect("skills fetch");

    mock.assert();
    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0].name, "Rust");
    assert!(skills[0].is_highlight);
    assert_eq!(skills[1].category, "databases");
}

#[tokio::test]
async fn filters_experiences_by_category() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/experience")
            .query_param("category", "eq.education")
            .query_param("order", "id.asc");
        then.status(200).json_body(json!([
            {
                "id": 10,
                "category": "education",
                "organization": "State University",
                "title": "BSc Computer Science",
                "role": "Student",
                "content": "Thesis on distributed systems",
                "start_date": "2012-09-01",
                "end_date": "2016-06-30"
            }
        ]));
    });

    let experiences = client_for(&server)
        .experiences(ExperienceCategory::Education)
        .await
        .expect("experience fetch");

    mock.assert();
    assert_eq!(experiences.len(), 1);
    assert_eq!(experiences[0].category, ExperienceCategory::Education);
    assert_eq!(experiences[0].organization, "State University");
    assert_eq!(experiences[0].start_date, "2012-09-01");
}

#[tokio::test]
async fn malformed_rows_fail_the_fetch_with_the_row_named() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/rest/v1/skill");
        then.status(200).json_body(json!([
            {"id": 1, "name": "Rust", "category": "languages", "is_highlight": false},
            {"id": 2, "name": "", "category": "languages", "is_highlight": false}
        ]));
    });

    let err = client_for(&server)
        .skills()
        .await
        .expect_err("blank name rejected");
    assert!(err.to_string().contains("skill row 2 is missing `name`"));
}

#[tokio::test]
async fn unknown_experience_category_is_rejected_at_the_boundary() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/rest/v1/experience");
        then.status(200).json_body(json!([
            {
                "id": 5,
                "category": "hobby",
                "organization": "Garage",
                "title": "Tinkerer",
                "start_date": "2020-01-01",
                "end_date": "2020-12-31"
            }
        ]));
    });

    let err = client_for(&server)
        .experiences(ExperienceCategory::Work)
        .await
        .expect_err("unknown category rejected");
    assert!(err.to_string().contains("unknown category `hobby`"));
}

#[tokio::test]
async fn non_success_status_surfaces_status_and_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/rest/v1/skill");
        then.status(401).body("permission denied");
    });

    let err = client_for(&server)
        .skills()
        .await
        .expect_err("unauthorized surfaces");
    let message = err.to_string();
    assert!(message.contains("401"));
    assert!(message.contains("permission denied"));
}
