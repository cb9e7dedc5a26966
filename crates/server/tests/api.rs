//! End-to-end API tests: a generated PDF uploaded through the router comes
//! back as a readable xlsx attachment.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use calamine::{Data, Reader, Xlsx};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::io::Cursor;
use tabella_server::{create_router, Config};
use tower::ServiceExt;

/// Build a single-page PDF whose text layer contains the given lines.
fn pdf_bytes(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    // One BT..ET block per line: lopdf's extract_text only emits a line
    // break at ET, so a single block would collapse all lines into one.
    let mut operations = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
        operations.push(Operation::new(
            "Td",
            vec![72.into(), (720 - 14 * i as i64).into()],
        ));
        operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn upload_request(uri: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "X-TEST-BOUNDARY";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn convert_roundtrip() {
    let pdf = pdf_bytes(&["Name      Amount", "Widget    1,000", "Gadget    2.50"]);

    let response = create_router(Config::default())
        .oneshot(upload_request("/api/convert", "report.pdf", &pdf))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"report.xlsx\""
    );
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let mut workbook = Xlsx::new(Cursor::new(body.to_vec())).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Page1_T1".to_string()]);

    let range = workbook.worksheet_range("Page1_T1").unwrap();
    assert_eq!(range.get_value((0, 0)), Some(&Data::String("Name".into())));
    assert_eq!(range.get_value((1, 1)), Some(&Data::Float(1000.0)));
    assert_eq!(range.get_value((2, 1)), Some(&Data::Float(2.5)));
}

#[tokio::test]
async fn uppercase_extension_is_accepted() {
    let pdf = pdf_bytes(&["Name      Amount", "Widget    1,000"]);

    let response = create_router(Config::default())
        .oneshot(upload_request("/api/convert", "report.PDF", &pdf))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"report.xlsx\""
    );
}

#[tokio::test]
async fn convert_merged_layout() {
    let pdf = pdf_bytes(&["Name      Amount", "Widget    1,000"]);

    let response = create_router(Config::default())
        .oneshot(upload_request(
            "/api/convert?layout=merged",
            "report.pdf",
            &pdf,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let workbook = Xlsx::new(Cursor::new(body.to_vec())).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Tables".to_string()]);
}

#[tokio::test]
async fn corrupt_pdf_is_a_server_error() {
    let response = create_router(Config::default())
        .oneshot(upload_request(
            "/api/convert",
            "broken.pdf",
            b"%PDF-1.5 garbage",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn prose_pdf_yields_nodata_workbook() {
    let pdf = pdf_bytes(&["Nothing tabular in this document."]);

    let response = create_router(Config::default())
        .oneshot(upload_request("/api/convert", "prose.pdf", &pdf))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let workbook = Xlsx::new(Cursor::new(body.to_vec())).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["NoData".to_string()]);
}
