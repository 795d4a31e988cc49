//! HTTP-level integration tests
//!
//! Each test starts the real server on an ephemeral port. Tests are skipped
//! when `DATABASE_URL` is not set.

use integration_tests::*;
use reqwest::StatusCode;
use serde_json::json;

macro_rules! require_env {
    () => {
        if !check_test_env() {
            return Ok(());
        }
    };
}

fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;

    let response = server.get("/health").await?;
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(body["status"], "healthy");

    let response = server.get("/health/ready").await?;
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "ok");

    let response = server.get("/ping").await?;
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await?;
    assert_eq!(body["ping"], "pong!");
    assert_eq!(body["testing"], true);
    Ok(())
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_register_and_login() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;

    let request = RegisterRequest::unique();
    let response = server.post("/auth/register", &request).await?;
    let registered: TokenResponse = assert_json(response, StatusCode::CREATED).await?;
    assert_eq!(registered.token_type, "bearer");
    assert_eq!(registered.user.email, request.email);
    assert!(registered.expires_in > 0);

    let login = LoginRequest {
        username: request.email.clone(),
        password: request.password.clone(),
    };
    let response = server.post("/auth/login", &login).await?;
    let token: TokenResponse = assert_json(response, StatusCode::OK).await?;
    assert_eq!(token.user.id, registered.user.id);

    let response = server.get_auth("/users", &token.access_token).await?;
    let users: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await?;
    assert!(users.iter().any(|u| u["email"] == request.email.as_str()));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_registration_rejected() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;

    let request = RegisterRequest::unique();
    assert_status(server.post("/auth/register", &request).await?, StatusCode::CREATED).await?;

    let response = server.post("/auth/register", &request).await?;
    let error: ErrorBody = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY).await?;
    assert_eq!(error.code, "EMAIL_ALREADY_EXISTS");
    Ok(())
}

#[tokio::test]
async fn test_login_failures_are_generic() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;
    let admin = register_admin(&server).await?;

    let wrong_password = LoginRequest {
        username: admin.user.email.clone(),
        password: "not-the-password".to_string(),
    };
    let unknown_user = LoginRequest {
        username: unique_email("nobody"),
        password: "attendance123".to_string(),
    };

    let first: ErrorBody =
        assert_json(server.post("/auth/login", &wrong_password).await?, StatusCode::UNAUTHORIZED).await?;
    let second: ErrorBody =
        assert_json(server.post("/auth/login", &unknown_user).await?, StatusCode::UNAUTHORIZED).await?;
    assert_eq!(first.detail, "Incorrect username or password");
    assert_eq!(first.detail, second.detail);
    assert_eq!(first.code, second.code);
    Ok(())
}

#[tokio::test]
async fn test_writes_require_token() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;

    let (request, _) = CreateGuardianRequest::unique();
    let response = server.post("/guardians", &request).await?;
    let error: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await?;
    assert_eq!(error.code, "MISSING_AUTH");

    let response = server.get_auth("/users", "not-a-jwt").await?;
    assert_status(response, StatusCode::UNAUTHORIZED).await?;
    Ok(())
}

// ============================================================================
// Guardians
// ============================================================================

#[tokio::test]
async fn test_guardian_phone_search_and_lifecycle() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;
    let admin = register_admin(&server).await?;
    let token = admin.access_token.as_str();

    let (guardian, digits) = create_guardian(&server, token).await?;

    // Local and international forms match the same record
    let response = server.get(&format!("/guardians?phone=0{digits}")).await?;
    let found: Vec<GuardianResponse> = assert_json(response, StatusCode::OK).await?;
    assert!(found.iter().any(|g| g.id == guardian.id));

    let response = server.get(&format!("/guardians?phone=%2B233{digits}")).await?;
    let found: Vec<GuardianResponse> = assert_json(response, StatusCode::OK).await?;
    assert!(found.iter().any(|g| g.id == guardian.id));

    let response = server
        .put_auth(&format!("/guardians/{}", guardian.id), token, &json!({ "first_name": "Akosua" }))
        .await?;
    let detail: DetailResponse = assert_json(response, StatusCode::OK).await?;
    assert_eq!(detail.detail, "Guardian updated successfully");

    let response = server.get(&format!("/guardians/{}", guardian.id)).await?;
    let updated: GuardianResponse = assert_json(response, StatusCode::OK).await?;
    assert_eq!(updated.first_name, "Akosua");
    assert_eq!(updated.last_name, guardian.last_name);

    let response = server.delete_auth(&format!("/guardians/{}", guardian.id), token).await?;
    assert_status(response, StatusCode::NO_CONTENT).await?;
    let response = server.get(&format!("/guardians/{}", guardian.id)).await?;
    assert_status(response, StatusCode::NOT_FOUND).await?;

    let response = server
        .put_empty_auth(&format!("/guardians/restore/{}", guardian.id), token)
        .await?;
    let detail: DetailResponse = assert_json(response, StatusCode::OK).await?;
    assert_eq!(detail.detail, "Guardian restored successfully");
    let response = server.get(&format!("/guardians/{}", guardian.id)).await?;
    assert_status(response, StatusCode::OK).await?;
    Ok(())
}

#[tokio::test]
async fn test_duplicate_guardian_phone_rejected() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;
    let admin = register_admin(&server).await?;

    let (request, _) = CreateGuardianRequest::unique();
    let response = server.post_auth("/guardians", &admin.access_token, &request).await?;
    assert_status(response, StatusCode::CREATED).await?;

    let response = server.post_auth("/guardians", &admin.access_token, &request).await?;
    let error: ErrorBody = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY).await?;
    assert_eq!(error.code, "PHONE_ALREADY_EXISTS");
    Ok(())
}

// ============================================================================
// Students
// ============================================================================

#[tokio::test]
async fn test_student_directory() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;
    let admin = register_admin(&server).await?;
    let token = admin.access_token.as_str();

    let (guardian, _) = create_guardian(&server, token).await?;
    let student = create_student(&server, token, vec![guardian.id]).await?;
    assert!(student.student_code.starts_with("LS"));
    assert_eq!(student.other_names.as_deref(), Some("Adjoa"));

    let response = server
        .get(&format!("/students?student_code={}", student.student_code))
        .await?;
    let list: StudentListResponse = assert_json(response, StatusCode::OK).await?;
    assert_eq!(list.students.len(), 1);
    assert_eq!(list.students[0].id, student.id);

    let response = server.get(&format!("/students/{}/guardians", student.student_code)).await?;
    let guardians: Vec<GuardianResponse> = assert_json(response, StatusCode::OK).await?;
    assert_eq!(guardians.len(), 1);
    assert_eq!(guardians[0].id, guardian.id);

    let response = server.get(&format!("/students/{}/qr-code", student.student_code)).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    assert!(response.text().await?.contains("<svg"));

    let response = server.post_empty(&format!("/students/{}/welcome", student.student_code)).await?;
    let detail: DetailResponse = assert_json(response, StatusCode::OK).await?;
    assert_eq!(detail.detail, "Welcome notification queued");
    Ok(())
}

#[tokio::test]
async fn test_student_soft_delete_and_restore() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;
    let admin = register_admin(&server).await?;
    let token = admin.access_token.as_str();

    let student = create_student(&server, token, vec![]).await?;

    let response = server.delete_auth(&format!("/students/{}", student.id), token).await?;
    assert_status(response, StatusCode::NO_CONTENT).await?;
    let response = server.get(&format!("/students/{}", student.id)).await?;
    assert_status(response, StatusCode::NOT_FOUND).await?;

    // Deleted students cannot check in
    let response = server.post_empty(&format!("/students/{}/check-in", student.student_code)).await?;
    assert_status(response, StatusCode::NOT_FOUND).await?;

    let response = server
        .put_empty_auth(&format!("/students/restore/{}", student.id), token)
        .await?;
    let detail: DetailResponse = assert_json(response, StatusCode::OK).await?;
    assert_eq!(detail.detail, "Student restored successfully");

    let response = server.get(&format!("/students/{}", student.id)).await?;
    let envelope: StudentEnvelope = assert_json(response, StatusCode::OK).await?;
    assert_eq!(envelope.student.student_code, student.student_code);
    Ok(())
}

#[tokio::test]
async fn test_invalid_student_id_rejected() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;

    let response = server.get("/students/not-a-number").await?;
    let error: ErrorBody = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY).await?;
    assert_eq!(error.code, "INVALID_PATH_PARAMETER");
    Ok(())
}

// ============================================================================
// Attendance
// ============================================================================

#[tokio::test]
async fn test_student_attendance_day() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;
    let admin = register_admin(&server).await?;
    let token = admin.access_token.as_str();

    let (guardian, _) = create_guardian(&server, token).await?;
    let student = create_student(&server, token, vec![guardian.id]).await?;
    let code = student.student_code.as_str();

    // Check-out before check-in
    let response = server.post_empty(&format!("/students/{code}/check-out")).await?;
    assert_status(response, StatusCode::NOT_FOUND).await?;

    let response = server.post_empty(&format!("/students/{code}/check-in")).await?;
    let detail: DetailResponse = assert_json(response, StatusCode::OK).await?;
    assert_eq!(detail.detail, "Student check in successful");

    let response = server.post_empty(&format!("/students/{code}/check-in")).await?;
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await?;
    assert_eq!(error.code, "ALREADY_CHECKED_IN");

    let response = server.get(&format!("/attendance/checked-in?date={}", today())).await?;
    let list: AttendanceList<StudentAttendanceEntry> = assert_json(response, StatusCode::OK).await?;
    let entry = list
        .attendance
        .iter()
        .find(|e| e.student.id == student.id)
        .ok_or_else(|| anyhow::anyhow!("student missing from checked-in listing"))?;
    assert!(entry.times.checkin_at.is_some());
    assert!(entry.times.checkout_at.is_none());

    let response = server.post_empty(&format!("/students/{code}/check-out")).await?;
    let detail: DetailResponse = assert_json(response, StatusCode::OK).await?;
    assert_eq!(detail.detail, "Student check out successful");

    let response = server.post_empty(&format!("/students/{code}/check-out")).await?;
    let error: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await?;
    assert_eq!(error.code, "ALREADY_CHECKED_OUT");

    // The day is closed
    let response = server.post_empty(&format!("/students/{code}/check-in")).await?;
    assert_status(response, StatusCode::BAD_REQUEST).await?;

    let response = server.get("/attendance/checked-out").await?;
    let list: AttendanceList<StudentAttendanceEntry> = assert_json(response, StatusCode::OK).await?;
    assert!(list.attendance.iter().any(|e| e.student.id == student.id));

    let response = server.get(&format!("/students/{code}/attendance")).await?;
    let history: StudentHistory = assert_json(response, StatusCode::OK).await?;
    assert_eq!(history.student.id, student.id);
    assert_eq!(history.attendance.len(), 1);
    assert_eq!(history.attendance[0].date, today());
    assert!(history.attendance[0].checkout_at.is_some());
    Ok(())
}

#[tokio::test]
async fn test_unknown_code_is_not_found() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;

    let response = server.post_empty("/students/LS99999999-XXXXXX/check-in").await?;
    assert_status(response, StatusCode::NOT_FOUND).await?;
    let response = server.post_empty("/teachers/LS-99999999-XXXXXX-T/check-in").await?;
    assert_status(response, StatusCode::NOT_FOUND).await?;
    Ok(())
}

#[tokio::test]
async fn test_invalid_listing_date_rejected() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;

    let response = server.get("/attendance/checked-in?date=yesterday").await?;
    let error: ErrorBody = assert_json(response, StatusCode::UNPROCESSABLE_ENTITY).await?;
    assert_eq!(error.code, "INVALID_QUERY_PARAMETER");
    Ok(())
}

// ============================================================================
// Teachers
// ============================================================================

#[tokio::test]
async fn test_teacher_attendance_day() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;
    let admin = register_admin(&server).await?;
    let token = admin.access_token.as_str();

    let teacher = create_teacher(&server, token).await?;
    assert!(teacher.teacher_code.ends_with("-T"));
    let code = teacher.teacher_code.as_str();

    let response = server.post_empty(&format!("/teachers/{code}/check-in")).await?;
    let detail: DetailResponse = assert_json(response, StatusCode::OK).await?;
    assert_eq!(detail.detail, "Teacher check in successful");

    let response = server
        .get(&format!("/teachers-attendance/checked-in?date={}", today()))
        .await?;
    let list: AttendanceList<TeacherAttendanceEntry> = assert_json(response, StatusCode::OK).await?;
    assert!(list.attendance.iter().any(|e| e.teacher.id == teacher.id));

    // Student ledger is independent
    let response = server.get(&format!("/attendance/checked-in?date={}", today())).await?;
    let list: AttendanceList<StudentAttendanceEntry> = assert_json(response, StatusCode::OK).await?;
    assert!(list.attendance.iter().all(|e| e.student.student_code != teacher.teacher_code));

    let response = server.post_empty(&format!("/teachers/{code}/check-out")).await?;
    let detail: DetailResponse = assert_json(response, StatusCode::OK).await?;
    assert_eq!(detail.detail, "Teacher check out successful");

    let response = server.post_empty(&format!("/teachers/{code}/welcome")).await?;
    assert_status(response, StatusCode::OK).await?;
    Ok(())
}

#[tokio::test]
async fn test_teacher_update_and_delete() -> anyhow::Result<()> {
    require_env!();
    let server = TestServer::start().await?;
    let admin = register_admin(&server).await?;
    let token = admin.access_token.as_str();

    let teacher = create_teacher(&server, token).await?;

    let response = server
        .put_auth(&format!("/teachers/{}", teacher.id), token, &json!({ "first_name": "Kofi" }))
        .await?;
    assert_status(response, StatusCode::OK).await?;

    let response = server.get(&format!("/teachers/{}", teacher.id)).await?;
    let envelope: TeacherEnvelope = assert_json(response, StatusCode::OK).await?;
    assert_eq!(envelope.teacher.first_name, "Kofi");
    assert_eq!(envelope.teacher.phone, teacher.phone);

    let response = server.delete_auth(&format!("/teachers/{}", teacher.id), token).await?;
    assert_status(response, StatusCode::NO_CONTENT).await?;
    let response = server.get(&format!("/teachers/{}", teacher.id)).await?;
    assert_status(response, StatusCode::NOT_FOUND).await?;
    Ok(())
}
