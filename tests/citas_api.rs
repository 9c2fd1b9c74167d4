mod common;

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use common::{spawn_app, TestApp};

struct Clinic {
    admin: String,
    paciente_id: i32,
    paciente: String,
    medico_id: i32,
    medico: String,
}

async fn clinic(app: &TestApp) -> Clinic {
    let admin = app.admin_token().await;
    let (_, medico_id, medico) = app.create_medico(&admin, "medico@correo.mx", "Medicina Interna").await;
    let (paciente_id, paciente) = app.register_paciente("paciente@correo.mx").await;
    Clinic {
        admin,
        paciente_id,
        paciente,
        medico_id,
        medico,
    }
}

#[tokio::test]
async fn test_create_cita() {
    let app = spawn_app().await;
    let c = clinic(&app).await;

    let cita = app
        .create_cita(&c.paciente, c.paciente_id, c.medico_id, Utc::now() + Duration::days(5))
        .await;
    assert_eq!(cita["estado"], "programada");
    assert_eq!(cita["paciente"]["id"], c.paciente_id);
    assert_eq!(cita["paciente"]["persona"]["nombre"], "Ana");
    assert_eq!(cita["medico"]["id"], c.medico_id);
    assert_eq!(cita["medico"]["usuario"]["persona"]["nombre"], "Laura");
    assert!(cita.get("notificaciones").is_none());
}

#[tokio::test]
async fn test_create_cita_rules() {
    let app = spawn_app().await;
    let c = clinic(&app).await;
    let future = (Utc::now() + Duration::days(2)).to_rfc3339();

    let (status, body) = app
        .post(
            "/api/citas",
            &c.paciente,
            json!({
                "paciente_id": c.paciente_id,
                "medico_id": c.medico_id,
                "fecha_cita": (Utc::now() - Duration::hours(1)).to_rfc3339(),
                "motivo": "Tarde"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "La fecha de la cita debe ser futura");

    let (status, body) = app
        .post(
            "/api/citas",
            &c.admin,
            json!({ "paciente_id": 999, "medico_id": c.medico_id, "fecha_cita": future, "motivo": "X" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Paciente no encontrado");

    let (status, body) = app
        .post(
            "/api/citas",
            &c.paciente,
            json!({ "paciente_id": c.paciente_id, "medico_id": 999, "fecha_cita": future, "motivo": "X" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Médico no encontrado");

    let (otro_id, _) = app.register_paciente("otro@correo.mx").await;
    let (status, _) = app
        .post(
            "/api/citas",
            &c.paciente,
            json!({ "paciente_id": otro_id, "medico_id": c.medico_id, "fecha_cita": future, "motivo": "X" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            "/api/citas",
            &c.paciente,
            json!({ "paciente_id": c.paciente_id, "medico_id": c.medico_id, "fecha_cita": future, "motivo": "m".repeat(501) }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Administradores may book for anyone
    let (status, _) = app
        .post(
            "/api/citas",
            &c.admin,
            json!({ "paciente_id": otro_id, "medico_id": c.medico_id, "fecha_cita": future, "motivo": "Control" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_citas_by_role() {
    let app = spawn_app().await;
    let c = clinic(&app).await;
    let (otro_id, otro) = app.register_paciente("otro@correo.mx").await;

    let near = app
        .create_cita(&c.paciente, c.paciente_id, c.medico_id, Utc::now() + Duration::days(2))
        .await;
    let far = app
        .create_cita(&c.paciente, c.paciente_id, c.medico_id, Utc::now() + Duration::days(9))
        .await;
    app.create_cita(&otro, otro_id, c.medico_id, Utc::now() + Duration::days(4))
        .await;

    let (status, mine) = app.get("/api/citas", &c.paciente).await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 2);
    // Most recent appointment date first
    assert_eq!(mine[0]["id"], far["id"]);
    assert_eq!(mine[1]["id"], near["id"]);

    let (_, medico) = app.get("/api/citas", &c.medico).await;
    assert_eq!(medico.as_array().unwrap().len(), 3);

    let (_, admin) = app.get("/api/citas", &c.admin).await;
    assert_eq!(admin.as_array().unwrap().len(), 3);

    let (_, todas) = app.get("/api/admin/citas/todas", &c.admin).await;
    assert_eq!(todas.as_array().unwrap().len(), 3);

    let (status, _) = app.get("/api/admin/citas/todas", &c.paciente).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_citas_for_medico_without_record() {
    let app = spawn_app().await;
    let admin = app.admin_token().await;
    app.create_usuario(&admin, "sinregistro@correo.mx", "medico").await;
    let token = app.login("sinregistro@correo.mx", common::PASSWORD).await;

    let (status, body) = app.get("/api/citas", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "No se encontró médico asociado a este usuario");
}

#[tokio::test]
async fn test_list_citas_filters() {
    let app = spawn_app().await;
    let c = clinic(&app).await;

    let target_day = (Utc::now() + Duration::days(6)).date_naive();
    let at_ten = Utc.from_utc_datetime(&target_day.and_hms_opt(10, 0, 0).unwrap());
    let on_day = app.create_cita(&c.paciente, c.paciente_id, c.medico_id, at_ten).await;
    let other = app
        .create_cita(&c.paciente, c.paciente_id, c.medico_id, at_ten + Duration::days(3))
        .await;

    let (status, filtered) = app
        .get(&format!("/api/citas?fecha={target_day}"), &c.paciente)
        .await;
    assert_eq!(status, StatusCode::OK);
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["id"], on_day["id"]);

    let id = other["id"].as_i64().unwrap();
    let (status, _) = app
        .put(&format!("/api/admin/citas/{id}"), &c.admin, json!({ "estado": "completada" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, completed) = app.get("/api/citas?estado=completada", &c.paciente).await;
    let completed = completed.as_array().unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0]["id"], id);

    let (_, scheduled) = app.get("/api/citas?estado=programada", &c.paciente).await;
    assert_eq!(scheduled.as_array().unwrap().len(), 1);

    let (status, body) = app.get("/api/citas?estado=perdida", &c.paciente).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Estado inválido. Use programada, cancelada o completada");

    // Empty filters mean no filter
    let (status, any) = app.get("/api/citas?estado=&fecha=", &c.paciente).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(any.as_array().unwrap().len(), 2);

    let (status, body) = app.get("/api/citas?fecha=manana", &c.paciente).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Formato de fecha inválido. Use YYYY-MM-DD");
}

#[tokio::test]
async fn test_cita_detail_visibility() {
    let app = spawn_app().await;
    let c = clinic(&app).await;
    let (_, otro) = app.register_paciente("otro@correo.mx").await;
    let (_, _, otro_medico) = app.create_medico(&c.admin, "otro.medico@correo.mx", "Urología").await;

    let cita = app
        .create_cita(&c.paciente, c.paciente_id, c.medico_id, Utc::now() + Duration::days(3))
        .await;
    let uri = format!("/api/citas/{}", cita["id"]);

    for token in [&c.paciente, &c.medico, &c.admin] {
        let (status, body) = app.get(&uri, token).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["notificaciones"].as_array().unwrap().is_empty());
    }

    for token in [&otro, &otro_medico] {
        let (status, body) = app.get(&uri, token).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["message"], "No tienes permiso para ver esta cita");
    }

    let (status, _) = app.get("/api/citas/999", &c.admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_cita_creates_notificacion() {
    let app = spawn_app().await;
    let c = clinic(&app).await;
    let cita = app
        .create_cita(&c.paciente, c.paciente_id, c.medico_id, Utc::now() + Duration::days(3))
        .await;
    let id = cita["id"].as_i64().unwrap();

    let (status, body) = app
        .request("PUT", &format!("/api/citas/{id}/cancelar"), Some(c.paciente.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cita cancelada exitosamente");
    assert_eq!(body["cita"]["estado"], "cancelada");

    let notices = body["cita"]["notificaciones"].as_array().unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0]["tipo"], "cancelación");
    assert_eq!(notices[0]["mensaje"], "Su cita ha sido cancelada");
    assert_eq!(notices[0]["usuario_id"], c.paciente_id);

    let (_, mine) = app.get("/api/notificaciones", &c.paciente).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let (status, body) = app
        .request("PUT", &format!("/api/citas/{id}/cancelar"), Some(c.paciente.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "La cita ya está cancelada");
}

#[tokio::test]
async fn test_cancel_cita_rules() {
    let app = spawn_app().await;
    let c = clinic(&app).await;
    let (_, otro) = app.register_paciente("otro@correo.mx").await;

    let soon = app
        .create_cita(&c.paciente, c.paciente_id, c.medico_id, Utc::now() + Duration::hours(3))
        .await;
    let (status, body) = app
        .request("PUT", &format!("/api/citas/{}/cancelar", soon["id"]), Some(c.paciente.as_str()), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "No se puede cancelar con menos de 24 horas de anticipación");

    let later = app
        .create_cita(&c.paciente, c.paciente_id, c.medico_id, Utc::now() + Duration::days(4))
        .await;
    let later_uri = format!("/api/citas/{}/cancelar", later["id"]);

    // Neither the paciente nor an administrador; the treating medico included
    for token in [&otro, &c.medico] {
        let (status, body) = app.request("PUT", &later_uri, Some(token.as_str()), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["message"], "No tienes permiso para cancelar esta cita");
    }

    let completed = app
        .create_cita(&c.paciente, c.paciente_id, c.medico_id, Utc::now() + Duration::days(5))
        .await;
    let (status, _) = app
        .put(
            &format!("/api/admin/citas/{}", completed["id"]),
            &c.admin,
            json!({ "estado": "completada" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/citas/{}/cancelar", completed["id"]),
            Some(c.paciente.as_str()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "No se puede cancelar una cita ya completada");

    // Administrador cancels on the paciente's behalf; the notice still goes to the paciente
    let (status, body) = app.request("PUT", &later_uri, Some(c.admin.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cita"]["notificaciones"][0]["usuario_id"], c.paciente_id);

    let (status, _) = app.request("PUT", "/api/citas/999/cancelar", Some(c.admin.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Failed attempts left no notices behind
    let (_, mine) = app.get("/api/notificaciones", &c.paciente).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_admin_update_cita() {
    let app = spawn_app().await;
    let c = clinic(&app).await;
    let cita = app
        .create_cita(&c.paciente, c.paciente_id, c.medico_id, Utc::now() + Duration::days(3))
        .await;
    let uri = format!("/api/admin/citas/{}", cita["id"]);

    let (status, body) = app
        .put(&uri, &c.admin, json!({ "fecha_cita": (Utc::now() - Duration::days(1)).to_rfc3339() }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "La fecha de la cita debe ser futura");

    let (status, _) = app.put(&uri, &c.admin, json!({ "estado": "olvidada" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .put(&uri, &c.admin, json!({ "motivo": "Seguimiento de tratamiento" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["motivo"], "Seguimiento de tratamiento");
    assert_eq!(body["estado"], "programada");

    let (status, _) = app.put("/api/admin/citas/999", &c.admin, json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_delete_cita() {
    let app = spawn_app().await;
    let c = clinic(&app).await;

    let plain = app
        .create_cita(&c.paciente, c.paciente_id, c.medico_id, Utc::now() + Duration::days(3))
        .await;
    let (status, body) = app.delete(&format!("/api/admin/citas/{}", plain["id"]), &c.admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cita eliminada correctamente");

    let (status, _) = app.delete(&format!("/api/admin/citas/{}", plain["id"]), &c.admin).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let noticed = app
        .create_cita(&c.paciente, c.paciente_id, c.medico_id, Utc::now() + Duration::days(3))
        .await;
    app.request(
        "PUT",
        &format!("/api/citas/{}/cancelar", noticed["id"]),
        Some(c.paciente.as_str()),
        None,
    )
    .await;
    let (status, body) = app.delete(&format!("/api/admin/citas/{}", noticed["id"]), &c.admin).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "No se puede eliminar, la cita tiene notificaciones asociadas");
}
