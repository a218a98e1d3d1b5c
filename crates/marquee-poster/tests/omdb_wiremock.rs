// SPDX-FileCopyrightText: 2026 Marquee Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Poster resolution against a local OMDb stand-in over real HTTP.

use std::sync::Arc;
use std::time::Duration;

use marquee_media::parse_media_info;
use marquee_poster::PosterResolver;
use marquee_transport::ReqwestTransport;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "abcd1234ef";

fn resolver(server: &MockServer) -> PosterResolver {
    let transport = ReqwestTransport::new("marquee-test").unwrap();
    PosterResolver::new(Arc::new(transport), Some(KEY.to_string()))
        .with_base_url(format!("{}/", server.uri()))
        .with_timeout(Duration::from_millis(500))
}

#[tokio::test]
async fn title_search_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("t", "Show Name"))
        .and(query_param("y", "2020"))
        .and(query_param("type", "series"))
        .and(query_param("apikey", KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Title": "Show Name",
            "Poster": "https://img.test/show.jpg",
            "Response": "True"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = "Show.Name.2020.S1E3.mkv";
    let poster = resolver(&server).resolve(&parse_media_info(file), file).await;

    assert_eq!(poster.as_deref(), Some("https://img.test/show.jpg"));
}

#[tokio::test]
async fn slow_metadata_api_is_abandoned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"Poster":"https://img.test/late.jpg","Response":"True"}"#)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let file = "Alien.1979.tt0078748.mkv";
    let poster = resolver(&server).resolve(&parse_media_info(file), file).await;

    assert_eq!(poster, None);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
