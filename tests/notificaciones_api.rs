mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use common::spawn_app;

#[tokio::test]
async fn test_notificacion_admin_crud() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let (_, medico_id, _) = app.create_medico(&admin, "medico@correo.mx", "Geriatría").await;
    let (paciente_id, paciente) = app.register_paciente("paciente@correo.mx").await;
    let cita = app
        .create_cita(&paciente, paciente_id, medico_id, Utc::now() + Duration::days(3))
        .await;
    let cita_id = cita["id"].as_i64().unwrap();

    let (status, created) = app
        .post(
            "/api/admin/notificaciones",
            &admin,
            json!({
                "usuario_id": paciente_id,
                "cita_id": cita_id,
                "tipo": "recordatorio",
                "mensaje": "Su cita es en tres días"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["tipo"], "recordatorio");
    assert_eq!(created["usuario"]["id"], paciente_id);
    assert_eq!(created["cita"]["id"], cita_id);
    assert!(created["fecha_envio"].is_string());
    let id = created["id"].as_i64().unwrap();

    let (status, mine) = app.get("/api/notificaciones", &paciente).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["cita"]["id"], cita_id);
    assert_eq!(mine[0]["usuario"]["id"], paciente_id);

    // Nothing addressed to the administrador
    let (_, admin_own) = app.get("/api/notificaciones", &admin).await;
    assert!(admin_own.as_array().unwrap().is_empty());

    let (status, updated) = app
        .put(
            &format!("/api/admin/notificaciones/{id}"),
            &admin,
            json!({ "tipo": "confirmación" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["tipo"], "confirmación");
    assert_eq!(updated["mensaje"], "Su cita es en tres días");

    let (status, todas) = app.get("/api/admin/notificaciones/todas", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(todas.as_array().unwrap().len(), 1);

    let (status, _) = app.get("/api/admin/notificaciones/todas", &paciente).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.delete(&format!("/api/admin/notificaciones/{id}"), &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Notificación eliminada correctamente");

    let (status, _) = app.put(&format!("/api/admin/notificaciones/{id}"), &admin, json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_notificacion_validation() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    let (_, medico_id, _) = app.create_medico(&admin, "medico@correo.mx", "Geriatría").await;
    let (paciente_id, paciente) = app.register_paciente("paciente@correo.mx").await;
    let cita = app
        .create_cita(&paciente, paciente_id, medico_id, Utc::now() + Duration::days(3))
        .await;

    let cases = [
        json!({ "usuario_id": 999, "cita_id": cita["id"], "tipo": "recordatorio", "mensaje": "Hola" }),
        json!({ "usuario_id": paciente_id, "cita_id": 999, "tipo": "recordatorio", "mensaje": "Hola" }),
        json!({ "usuario_id": paciente_id, "cita_id": cita["id"], "tipo": "aviso", "mensaje": "Hola" }),
        json!({ "usuario_id": paciente_id, "cita_id": cita["id"], "tipo": "recordatorio", "mensaje": "" }),
        json!({ "usuario_id": paciente_id, "cita_id": cita["id"], "tipo": "recordatorio", "mensaje": "x".repeat(501) }),
    ];
    for body in cases {
        let (status, _) = app.post("/api/admin/notificaciones", &admin, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
