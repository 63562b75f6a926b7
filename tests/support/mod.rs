#![allow(dead_code)]

use axum::Router;
use serde_json::{json, Value};

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind 127.0.0.1:0");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake backend");
    });

    format!("http://{}", addr)
}

/// A base URL nothing is listening on
pub async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind 127.0.0.1:0");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    format!("http://{}", addr)
}

pub fn owner_json() -> Value {
    json!({
        "id": "u9",
        "nombre": "Luis Pérez",
        "rol": "propietario",
        "correo": "luis@domu.cl"
    })
}

pub fn tenant_json() -> Value {
    json!({
        "_id": "u1",
        "nombre": "Ana Soto",
        "rol": "inquilino",
        "correo": "ana@domu.cl"
    })
}

pub fn property_json(id: &str) -> Value {
    json!({
        "_id": id,
        "nombre": "Depto Centro",
        "fotos": ["https://img.domu.cl/1.jpg", "https://img.domu.cl/2.jpg"],
        "direccion": "Av. Libertad 123, Viña del Mar",
        "precioBase": 450000,
        "tipo": "departamento",
        "caracteristicas": "2 dormitorios, 1 baño, estacionamiento",
        "estado": "disponible",
        "propietario": owner_json(),
        "idPropietario": "u9",
        "createdAt": "2025-03-01T12:00:00.000Z",
        "updatedAt": "2025-03-02T08:30:00.000Z"
    })
}

pub fn contract_json(id: &str) -> Value {
    json!({
        "_id": id,
        "fechaInicio": "2025-04-01T00:00:00.000Z",
        "fechaFin": "2026-04-01T00:00:00.000Z",
        "duracion": "12",
        "condiciones": "Sin mascotas",
        "idPropietario": "u9",
        "idInquilino": tenant_json(),
        "idPropiedad": property_json("p1"),
        "createdAt": "2025-03-20T10:00:00.000Z"
    })
}
