use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use recruitworx_backend::{
    database::memory::MemoryStore,
    models::{application::TransitionPolicy, user::Role},
    routes, AppState, ServiceSettings,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    state: AppState,
}

impl TestApp {
    fn new() -> Self {
        Self::with_settings(ServiceSettings::default())
    }

    fn with_settings(settings: ServiceSettings) -> Self {
        let state = AppState::new(Arc::new(MemoryStore::new()), settings);
        let router = routes::app(state.clone(), 1000, 1000);
        Self { router, state }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<JsonValue>,
    ) -> (StatusCode, JsonValue) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
        };
        (status, json)
    }

    async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        token: &str,
        raw: &str,
    ) -> (StatusCode, JsonValue) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {}", token))
            .header("content-type", "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap();
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json: JsonValue = serde_json::from_slice(&bytes).expect("response is JSON");
        (status, json)
    }

    async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": username, "password": password})),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }

    async fn candidate(&self, username: &str) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": "secret123",
                    "full_name": format!("{} Candidate", username),
                    "phone": "+1 555 0100"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        assert_eq!(body["user"]["role"], "candidate");
        self.login(username, "secret123").await
    }

    async fn staff(&self, username: &str, role: Role) -> String {
        self.state
            .auth_service
            .ensure_user(
                username,
                &format!("{}@example.com", username),
                "staffpass",
                "Hannah Recruiter",
                role,
            )
            .await
            .unwrap();
        self.login(username, "staffpass").await
    }

    async fn job(&self, token: &str, title: &str) -> i64 {
        let (status, body) = self
            .send(
                "POST",
                "/api/jobs",
                Some(token),
                Some(json!({
                    "title": title,
                    "description": "Build and run services",
                    "location": "Berlin",
                    "job_type": "Full-time",
                    "salary_range": "60k-80k",
                    "required_skills": "Rust, Postgres"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create job failed: {}", body);
        body["job_id"].as_i64().unwrap()
    }
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn hiring_flow_end_to_end() {
    let app = TestApp::new();
    let hr = app.staff("hr", Role::Hr).await;
    let candidate = app.candidate("carol").await;
    let job_id = app.job(&hr, "Backend Engineer").await;

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/jobs/{}/apply", job_id),
            Some(&candidate),
            Some(json!({"cover_letter": "I love Rust"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["application"]["status"], "applied");
    assert_eq!(body["application"]["job_id"], job_id);
    let application_id = body["application"]["id"].as_i64().unwrap();

    let (status, body) = app
        .send(
            "POST",
            "/api/interviews",
            Some(&hr),
            Some(json!({
                "application_id": application_id,
                "interview_date": "2025-09-01T10:00",
                "location": "Room 4"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["interview"]["status"], "scheduled");
    assert_eq!(body["interview"]["interview_date"], "2025-09-01T10:00:00");
    assert_eq!(body["application"]["status"], "interviewed");
    let interview_id = body["interview"]["id"].as_i64().unwrap();

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/api/applications/{}/status", application_id),
            Some(&hr),
            Some(json!({"status": "selected"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["application"]["status"], "selected");

    let (status, body) = app
        .send("GET", "/api/applications/mine", Some(&candidate), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let mine = body["applications"].as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["status"], "selected");
    assert_eq!(mine[0]["title"], "Backend Engineer");
    assert_eq!(mine[0]["interview_location"], "Room 4");
    assert_eq!(mine[0]["interview_status"], "scheduled");

    let (status, body) = app
        .send("GET", "/api/interviews", Some(&candidate), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let interviews = body["interviews"].as_array().unwrap();
    assert_eq!(interviews.len(), 1);
    assert_eq!(interviews[0]["id"], interview_id);
    assert_eq!(interviews[0]["status"], "scheduled");
    assert_eq!(interviews[0]["hr_name"], "Hannah Recruiter");

    let (status, body) = app.send("GET", "/api/interviews", Some(&hr), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["interviews"][0]["candidate_email"], "carol@example.com");
}

#[tokio::test]
async fn duplicate_application_and_interview_conflict() {
    let app = TestApp::new();
    let hr = app.staff("hr", Role::Admin).await;
    let candidate = app.candidate("dave").await;
    let job_id = app.job(&hr, "SRE").await;

    let (status, body) = app
        .send(
            "POST",
            "/api/applications",
            Some(&candidate),
            Some(json!({"job_id": job_id})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let application_id = body["application"]["id"].as_i64().unwrap();

    let (status, body) = app
        .send(
            "POST",
            &format!("/api/jobs/{}/apply", job_id),
            Some(&candidate),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "duplicate_application");
    assert_eq!(body["message"], "You have already applied to this job");

    let booking = json!({
        "application_id": application_id,
        "interview_date": "2025-09-01 10:00",
        "location": "Room 4"
    });
    let (status, _) = app
        .send("POST", "/api/interviews", Some(&hr), Some(booking.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = app
        .send("POST", "/api/interviews", Some(&hr), Some(booking))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "already_scheduled");
}

#[tokio::test]
async fn concurrent_submissions_persist_one_row() {
    let app = TestApp::new();
    let hr = app.staff("hr", Role::Hr).await;
    let candidate = app.candidate("erin").await;
    let job_id = app.job(&hr, "Data Engineer").await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let router = app.router.clone();
        let token = candidate.clone();
        handles.push(tokio::spawn(async move {
            let req = Request::builder()
                .method("POST")
                .uri(format!("/api/jobs/{}/apply", job_id))
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap();
            router.oneshot(req).await.unwrap().status()
        }));
    }
    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicts += 1,
            other => panic!("unexpected status {}", other),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);

    let (_, body) = app
        .send(
            "GET",
            &format!("/api/applications?job_id={}", job_id),
            Some(&hr),
            None,
        )
        .await;
    assert_eq!(body["applications"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn candidates_are_kept_out_of_privileged_operations() {
    let app = TestApp::new();
    let hr = app.staff("hr", Role::Hr).await;
    let candidate = app.candidate("frank").await;
    let job_id = app.job(&hr, "QA").await;

    let (_, body) = app
        .send(
            "POST",
            &format!("/api/jobs/{}/apply", job_id),
            Some(&candidate),
            None,
        )
        .await;
    let application_id = body["application"]["id"].as_i64().unwrap();

    let (status, _) = app
        .send("GET", "/api/applications/mine", Some(&candidate), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .send("GET", "/api/interviews/mine", Some(&candidate), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send("GET", "/api/applications", Some(&candidate), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "unauthorized");

    let (status, _) = app
        .send(
            "PUT",
            "/api/applications",
            Some(&candidate),
            Some(json!({"application_id": application_id, "status": "selected"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            "POST",
            "/api/interviews",
            Some(&candidate),
            Some(json!({
                "application_id": application_id,
                "interview_date": "2025-09-01T10:00",
                "location": "Room 4"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            "POST",
            "/api/jobs",
            Some(&candidate),
            Some(json!({"title": "x", "description": "x", "location": "x", "job_type": "x"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send("GET", "/api/applications/mine", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthenticated");
}

#[tokio::test]
async fn selected_application_is_reset_by_scheduling() {
    let app = TestApp::new();
    let hr = app.staff("hr", Role::Hr).await;
    let candidate = app.candidate("gina").await;
    let job_id = app.job(&hr, "Designer").await;
    let (_, body) = app
        .send(
            "POST",
            &format!("/api/jobs/{}/apply", job_id),
            Some(&candidate),
            None,
        )
        .await;
    let application_id = body["application"]["id"].as_i64().unwrap();

    let (status, _) = app
        .send(
            "PUT",
            "/api/applications",
            Some(&hr),
            Some(json!({"application_id": application_id, "status": "selected"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(
            "POST",
            "/api/interviews",
            Some(&hr),
            Some(json!({
                "application_id": application_id,
                "interview_date": "2025-10-02T09:30:00",
                "location": "Video call"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["application"]["status"], "interviewed");
}

#[tokio::test]
async fn lock_final_policy_rejects_leaving_a_decision() {
    let app = TestApp::with_settings(ServiceSettings {
        status_policy: TransitionPolicy::LockFinal,
        ..ServiceSettings::default()
    });
    let hr = app.staff("hr", Role::Hr).await;
    let candidate = app.candidate("hank").await;
    let job_id = app.job(&hr, "Analyst").await;
    let (_, body) = app
        .send(
            "POST",
            &format!("/api/jobs/{}/apply", job_id),
            Some(&candidate),
            None,
        )
        .await;
    let application_id = body["application"]["id"].as_i64().unwrap();
    let uri = format!("/api/applications/{}/status", application_id);

    let (status, _) = app
        .send("PATCH", &uri, Some(&hr), Some(json!({"status": "rejected"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app
        .send("PATCH", &uri, Some(&hr), Some(json!({"status": "shortlisted"})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "invalid_transition");
}

#[tokio::test]
async fn unknown_ids_and_bad_input_are_reported() {
    let app = TestApp::new();
    let hr = app.staff("hr", Role::Hr).await;
    let candidate = app.candidate("ivy").await;

    let (status, body) = app
        .send(
            "PATCH",
            "/api/applications/9999/status",
            Some(&hr),
            Some(json!({"status": "selected"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = app
        .send(
            "PATCH",
            "/api/interviews/9999",
            Some(&hr),
            Some(json!({"feedback": "n/a"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(
            "PUT",
            "/api/interviews",
            Some(&hr),
            Some(json!({"feedback": "n/a"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing_field");

    let (status, body) = app
        .send(
            "PUT",
            "/api/applications",
            Some(&hr),
            Some(json!({"application_id": 1, "status": "hired"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_status");

    let (status, body) = app
        .send("POST", "/api/applications", Some(&candidate), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "job_id is required");

    let (status, _) = app
        .send("POST", "/api/jobs/9999/apply", Some(&candidate), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn interview_feedback_is_a_partial_update() {
    let app = TestApp::new();
    let hr = app.staff("hr", Role::Hr).await;
    let candidate = app.candidate("jack").await;
    let job_id = app.job(&hr, "PM").await;
    let (_, body) = app
        .send(
            "POST",
            &format!("/api/jobs/{}/apply", job_id),
            Some(&candidate),
            None,
        )
        .await;
    let application_id = body["application"]["id"].as_i64().unwrap();
    let (_, body) = app
        .send(
            "POST",
            "/api/interviews",
            Some(&hr),
            Some(json!({
                "application_id": application_id,
                "interview_date": "2025-09-01T10:00",
                "location": "Room 4",
                "notes": "Bring portfolio"
            })),
        )
        .await;
    let interview_id = body["interview"]["id"].as_i64().unwrap();

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/api/interviews/{}", interview_id),
            Some(&hr),
            Some(json!({"feedback": "Strong system design"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let interview = &body["interview"];
    assert_eq!(interview["feedback"], "Strong system design");
    assert_eq!(interview["interview_date"], "2025-09-01T10:00:00");
    assert_eq!(interview["location"], "Room 4");
    assert_eq!(interview["notes"], "Bring portfolio");
    assert_eq!(interview["status"], "scheduled");

    let (status, body) = app
        .send(
            "PUT",
            "/api/interviews",
            Some(&hr),
            Some(json!({"id": interview_id, "status": "completed", "rating": 4})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["interview"]["status"], "completed");
    assert_eq!(body["interview"]["rating"], 4);
    assert_eq!(body["interview"]["feedback"], "Strong system design");

    let (_, body) = app
        .send("GET", "/api/applications/mine", Some(&candidate), None)
        .await;
    assert_eq!(body["applications"][0]["status"], "interviewed");
}

#[tokio::test]
async fn job_catalog_counts_applications() {
    let app = TestApp::new();
    let hr = app.staff("hr", Role::Hr).await;
    let candidate = app.candidate("kim").await;
    let job_id = app.job(&hr, "Platform Engineer").await;

    let (status, body) = app
        .send("GET", &format!("/api/jobs/{}", job_id), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["job"]["title"], "Platform Engineer");
    assert_eq!(body["job"]["location"], "Berlin");
    assert_eq!(body["job"]["status"], "active");
    assert_eq!(body["job"]["created_by_name"], "Hannah Recruiter");
    assert_eq!(body["job"]["application_count"], 0);

    app.send(
        "POST",
        &format!("/api/jobs/{}/apply", job_id),
        Some(&candidate),
        None,
    )
    .await;
    let (_, body) = app
        .send("GET", &format!("/api/jobs/{}", job_id), None, None)
        .await;
    assert_eq!(body["job"]["application_count"], 1);

    let (status, body) = app
        .send("GET", "/api/jobs?search=postgres&location=berl", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jobs"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .send(
            "PATCH",
            &format!("/api/jobs/{}", job_id),
            Some(&hr),
            Some(json!({"status": "closed"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.send("GET", "/api/jobs", None, None).await;
    assert!(body["jobs"].as_array().unwrap().is_empty());

    let (status, _) = app
        .send("DELETE", &format!("/api/jobs/{}", job_id), Some(&hr), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .send("GET", &format!("/api/jobs/{}", job_id), None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sessions_check_and_logout() {
    let app = TestApp::new();
    let token = app.candidate("lena").await;

    let (status, body) = app.send("GET", "/api/auth/check", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["username"], "lena");
    assert_eq!(body["user"]["role"], "candidate");

    let (status, _) = app.send("POST", "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.send("GET", "/api/auth/check", Some(&token), None).await;
    assert_eq!(body["authenticated"], false);

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"username": "lena", "password": "wrong-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_credentials");

    let (status, body) = app
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "username": "lena",
                "email": "other@example.com",
                "password": "secret123",
                "full_name": "Lena Again"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "duplicate_user");
}

#[tokio::test]
async fn dashboard_depends_on_role() {
    let app = TestApp::new();
    let hr = app.staff("hr", Role::Hr).await;
    let candidate = app.candidate("mona").await;
    let job_id = app.job(&hr, "Support Engineer").await;
    app.send(
        "POST",
        &format!("/api/jobs/{}/apply", job_id),
        Some(&candidate),
        None,
    )
    .await;

    let (status, body) = app.send("GET", "/api/dashboard", Some(&candidate), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "candidate");
    assert_eq!(body["stats"]["total_applications"], 1);
    assert_eq!(body["stats"]["by_status"]["applied"], 1);

    let (status, body) = app.send("GET", "/api/dashboard", Some(&hr), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["view"], "hr");
    assert_eq!(body["stats"]["total_jobs"], 1);
    assert_eq!(body["popular_jobs"][0]["application_count"], 1);

    let (status, _) = app.send("GET", "/api/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_bodies_get_a_structured_failure() {
    let app = TestApp::new();
    let hr = app.staff("hr", Role::Hr).await;
    let candidate = app.candidate("cara").await;
    let job_id = app.job(&hr, "Platform engineer").await;

    let (status, body) = app
        .send_raw(
            "POST",
            "/api/interviews",
            &hr,
            r#"{"application_id":"12","interview_date":"2030-01-01T10:00","location":"Room 1"}"#,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].is_string());

    let (status, body) = app
        .send_raw("PUT", "/api/applications", &hr, "{not json")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let apply = format!("/api/jobs/{}/apply", job_id);
    let (status, body) = app
        .send_raw("POST", &apply, &candidate, r#"{"cover_letter": 42"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (_, listing) = app
        .send("GET", "/api/applications/mine", Some(&candidate), None)
        .await;
    assert_eq!(listing["applications"].as_array().unwrap().len(), 0);

    let (status, _) = app.send("POST", &apply, Some(&candidate), None).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn interview_location_cannot_be_blanked() {
    let app = TestApp::new();
    let hr = app.staff("hr", Role::Hr).await;
    let candidate = app.candidate("cara").await;
    let job_id = app.job(&hr, "Platform engineer").await;

    let (_, applied) = app
        .send(
            "POST",
            &format!("/api/jobs/{}/apply", job_id),
            Some(&candidate),
            None,
        )
        .await;
    let application_id = applied["application"]["id"].as_i64().unwrap();
    let (status, booked) = app
        .send(
            "POST",
            "/api/interviews",
            Some(&hr),
            Some(json!({
                "application_id": application_id,
                "interview_date": "2030-01-01T10:00",
                "location": "Room 1"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let interview_id = booked["interview"]["id"].as_i64().unwrap();

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/api/interviews/{}", interview_id),
            Some(&hr),
            Some(json!({"location": "   "})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing_field");

    let (_, listing) = app.send("GET", "/api/interviews", Some(&hr), None).await;
    assert_eq!(listing["interviews"][0]["location"], "Room 1");
}
