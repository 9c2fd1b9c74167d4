mod common;

use axum::http::StatusCode;
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};
use serde_json::json;

use common::spawn_app;

/// Next date (after today) falling on `weekday`.
fn next_weekday(weekday: Weekday) -> NaiveDate {
    let mut date = Utc::now().date_naive() + Duration::days(1);
    while date.weekday() != weekday {
        date += Duration::days(1);
    }
    date
}

#[tokio::test]
async fn test_create_medico_embeds_usuario_and_persona() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let (usuario_id, medico_id, token) = app.create_medico(&admin, "house@correo.mx", "Diagnóstico").await;

    let (status, body) = app.get(&format!("/api/medicos/{medico_id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["especialidad"], "Diagnóstico");
    assert_eq!(body["usuario"]["id"], usuario_id);
    assert_eq!(body["usuario"]["rol"], "medico");
    assert_eq!(body["usuario"]["persona"]["nombre"], "Laura");

    let (status, list) = app.get("/api/medicos", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_medico_rules() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let (paciente_id, _) = app.register_paciente("noesmedico@correo.mx").await;

    let (status, body) = app
        .post(
            "/api/admin/medicos",
            &admin,
            json!({ "usuario_id": paciente_id, "especialidad": "Pediatría" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "El usuario debe tener rol 'medico'");

    let (status, _) = app
        .post("/api/admin/medicos", &admin, json!({ "usuario_id": 999, "especialidad": "Pediatría" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (usuario_id, _, _) = app.create_medico(&admin, "doble@correo.mx", "Pediatría").await;
    let (status, _) = app
        .post(
            "/api/admin/medicos",
            &admin,
            json!({ "usuario_id": usuario_id, "especialidad": "Neurología" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post(
            "/api/admin/medicos",
            &admin,
            json!({ "usuario_id": usuario_id, "especialidad": "x".repeat(101) }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_medico() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let (_, medico_id, _) = app.create_medico(&admin, "cambio@correo.mx", "Dermatología").await;

    let (status, body) = app
        .put(
            &format!("/api/admin/medicos/{medico_id}"),
            &admin,
            json!({ "especialidad": "Dermatología Pediátrica" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["especialidad"], "Dermatología Pediátrica");

    let (status, _) = app
        .post(
            &format!("/api/admin/medicos/{medico_id}/horarios"),
            &admin,
            json!({ "dia_semana": "Lunes", "hora_inicio": "09:00", "hora_fin": "13:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.delete(&format!("/api/admin/medicos/{medico_id}"), &admin).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "No se puede eliminar, el médico tiene horarios asignados");

    let (_, horarios) = app.get(&format!("/api/medicos/{medico_id}/horarios"), &admin).await;
    let horario_id = horarios[0]["id"].as_i64().unwrap();
    let (status, _) = app.delete(&format!("/api/admin/horarios/{horario_id}"), &admin).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.delete(&format!("/api/admin/medicos/{medico_id}"), &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Médico eliminado correctamente");

    let (status, _) = app.get(&format!("/api/medicos/{medico_id}"), &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_medico_with_citas_cannot_be_deleted() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let (_, medico_id, _) = app.create_medico(&admin, "ocupado@correo.mx", "Oftalmología").await;
    let (paciente_id, paciente) = app.register_paciente("paciente@correo.mx").await;
    app.create_cita(&paciente, paciente_id, medico_id, Utc::now() + Duration::days(3))
        .await;

    let (status, body) = app.delete(&format!("/api/admin/medicos/{medico_id}"), &admin).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "No se puede eliminar, el médico tiene citas programadas");
}

#[tokio::test]
async fn test_horario_time_range() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let (_, medico_id, _) = app.create_medico(&admin, "horas@correo.mx", "Medicina General").await;
    let uri = format!("/api/admin/medicos/{medico_id}/horarios");

    let (status, body) = app
        .post(&uri, &admin, json!({ "dia_semana": "Martes", "hora_inicio": "14:00", "hora_fin": "09:00" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "La hora de fin debe ser posterior a la hora de inicio");

    let (status, _) = app
        .post(&uri, &admin, json!({ "dia_semana": "Martes", "hora_inicio": "9am", "hora_fin": "10:00" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(&uri, &admin, json!({ "dia_semana": "Funday", "hora_inicio": "09:00", "hora_fin": "10:00" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/admin/medicos/999/horarios",
            &admin,
            json!({ "dia_semana": "Martes", "hora_inicio": "09:00", "hora_fin": "10:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, created) = app
        .post(
            &uri,
            &admin,
            json!({ "dia_semana": "Miércoles", "hora_inicio": "09:00:00", "hora_fin": "12:30" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["dia_semana"], "Miércoles");
    assert_eq!(created["hora_fin"], "12:30:00");
    assert_eq!(created["medico"]["id"], medico_id);
    let horario_id = created["id"].as_i64().unwrap();

    // Moving only the start past the stored end is rejected
    let (status, _) = app
        .put(&format!("/api/admin/horarios/{horario_id}"), &admin, json!({ "hora_inicio": "13:00" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, updated) = app
        .put(
            &format!("/api/admin/horarios/{horario_id}"),
            &admin,
            json!({ "dia_semana": "Sábado", "hora_fin": "14:00" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["dia_semana"], "Sábado");
    assert_eq!(updated["hora_inicio"], "09:00:00");
    assert_eq!(updated["hora_fin"], "14:00:00");

    let (status, _) = app.put("/api/admin/horarios/999", &admin, json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/medicos/999/horarios", &admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_disponibles_filters() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let (_, cardio, _) = app.create_medico(&admin, "cardio@correo.mx", "Cardiología").await;
    let (_, pedia, _) = app.create_medico(&admin, "pedia@correo.mx", "Pediatría").await;

    for (medico, dia) in [(cardio, "Lunes"), (pedia, "Viernes")] {
        let (status, _) = app
            .post(
                &format!("/api/admin/medicos/{medico}/horarios"),
                &admin,
                json!({ "dia_semana": dia, "hora_inicio": "08:00", "hora_fin": "12:00" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, all) = app.get("/api/medicos/disponibles", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["nombre"], "Laura");
    assert_eq!(all[0]["apellido_paterno"], "Gómez");

    let (_, by_specialty) = app.get("/api/medicos/disponibles?especialidad=CARDIO", &admin).await;
    let by_specialty = by_specialty.as_array().unwrap();
    assert_eq!(by_specialty.len(), 1);
    assert_eq!(by_specialty[0]["id"], cardio);

    let monday = next_weekday(Weekday::Mon);
    let (_, on_monday) = app
        .get(&format!("/api/medicos/disponibles?fecha={monday}"), &admin)
        .await;
    let on_monday = on_monday.as_array().unwrap();
    assert_eq!(on_monday.len(), 1);
    assert_eq!(on_monday[0]["id"], cardio);

    let sunday = next_weekday(Weekday::Sun);
    let (_, on_sunday) = app
        .get(&format!("/api/medicos/disponibles?fecha={sunday}"), &admin)
        .await;
    assert!(on_sunday.as_array().unwrap().is_empty());

    let friday = next_weekday(Weekday::Fri);
    let (_, combined) = app
        .get(
            &format!("/api/medicos/disponibles?especialidad=cardio&fecha={friday}"),
            &admin,
        )
        .await;
    assert!(combined.as_array().unwrap().is_empty());

    let (status, body) = app.get("/api/medicos/disponibles?fecha=31/12/2030", &admin).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Formato de fecha inválido. Use YYYY-MM-DD");
}

#[tokio::test]
async fn test_disponibles_matches_accented_specialty() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let (_, cardio, _) = app.create_medico(&admin, "mayus@correo.mx", "CARDIOLOGÍA").await;

    let (status, found) = app
        .get("/api/medicos/disponibles?especialidad=cardiolog%C3%ADa", &admin)
        .await;
    assert_eq!(status, StatusCode::OK);
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], cardio);
    assert_eq!(found[0]["especialidad"], "CARDIOLOGÍA");

    let (_, wildcard) = app.get("/api/medicos/disponibles?especialidad=%25", &admin).await;
    assert!(wildcard.as_array().unwrap().is_empty());
}
