pub mod capture_server;

#[cfg(test)]
mod tests {
    use crate::capture_server::CaptureServer;
    use formpost::{
        interceptors::FORM_URLENCODED, Client, ClientConfiguration, Error, LoadingHandle,
        LoadingIndicator, RequestConfig,
    };
    use futures::future::join_all;
    use serde_json::json;
    use std::{net::TcpListener, sync::Arc};
    use user_api_client::UserApiClientBuilder;

    fn form_client(base_url: &str) -> (Client, Arc<LoadingHandle>) {
        let mut configuration = ClientConfiguration::new();
        configuration.set_base_url(base_url).unwrap();

        let handle = Arc::new(LoadingHandle::new());
        let indicator = handle.clone();
        let mut client = Client::new(configuration);
        client.add_interceptors(move |interceptors| interceptors.form_urlencoded(indicator));

        (client, handle)
    }

    fn closed_port_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", address)
    }

    #[tokio::test]
    async fn post_record_is_sent_as_a_form() {
        let server = CaptureServer::start(r#"{"code":0}"#).unwrap();
        let (client, _) = form_client(&server.base_url());

        let response = client
            .post("/submit", json!({"a": 1, "b": "x"}))
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].uri, "/submit");
        assert_eq!(requests[0].headers["content-type"], FORM_URLENCODED);
        assert_eq!(requests[0].headers["content-length"], "7");
        assert_eq!(requests[0].body, "a=1&b=x");
    }

    #[tokio::test]
    async fn post_body_decodes_back_to_the_record() {
        let server = CaptureServer::start(r#"{"code":0}"#).unwrap();
        let (client, _) = form_client(&server.base_url());

        client
            .post(
                "/submit",
                json!({"nickname": "a b&c", "tags": ["x", "y"], "meta": {"age": 30}}),
            )
            .await
            .unwrap();

        let body = &server.requests()[0].body;
        let pairs = url::form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![
                ("nickname".to_string(), "a b&c".to_string()),
                ("tags[0]".to_string(), "x".to_string()),
                ("tags[1]".to_string(), "y".to_string()),
                ("meta[age]".to_string(), "30".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn serialized_post_body_is_spread_before_encoding() {
        let server = CaptureServer::start(r#"{"code":0}"#).unwrap();
        let (client, _) = form_client(&server.base_url());

        client.post("/submit", "a b~").await.unwrap();

        assert_eq!(server.requests()[0].body, "0=a&1=%20&2=b&3=~");
    }

    #[tokio::test]
    async fn non_post_body_is_unchanged_but_content_type_is_forced() {
        let server = CaptureServer::start(r#"{"code":0}"#).unwrap();
        let (client, _) = form_client(&server.base_url());
        let config = RequestConfig::new("put", "/resource")
            .with_header("Content-Type", "application/json")
            .with_data(json!({"a": 1}));

        client.request(config).await.unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[0].headers["content-type"], FORM_URLENCODED);
        assert_eq!(requests[0].body, r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn concurrent_construction_failures_each_close_the_indicator() {
        let server = CaptureServer::start(r#"{"code":0}"#).unwrap();
        let (client, handle) = form_client(&server.base_url());
        handle.open();

        let results = join_all((0..10).map(|i| {
            client.request(RequestConfig::new("get", format!("/broken/{}", i)).with_header("X-Bad", "a\nb"))
        }))
        .await;

        for result in results {
            assert!(matches!(result, Err(Error::InvalidHeaderValue(name)) if name == "X-Bad"));
        }
        assert_eq!(handle.close_calls(), 10);
        assert!(!handle.is_open());
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn network_failures_do_not_reach_the_error_hook() {
        let (client, handle) = form_client(&closed_port_url());
        handle.open();

        let error = client.get("/").await.unwrap_err();

        assert!(!error.is_request_phase());
        assert!(matches!(error, Error::HyperError(_)));
        assert!(handle.is_open());
        assert_eq!(handle.close_calls(), 0);
    }

    #[tokio::test]
    async fn user_api_client_logs_in_over_the_wire() {
        let server = CaptureServer::start(
            r#"{"code":0,"data":{"user":{"id":3,"nickname":"wang","phonenum":"13900139000"}}}"#,
        )
        .unwrap();
        let handle = Arc::new(LoadingHandle::new());
        let client = UserApiClientBuilder::new()
            .with_domain_name(server.base_url())
            .with_indicator(handle.clone())
            .build()
            .unwrap();

        let user = client.login("13900139000", "8888").await.unwrap();

        assert_eq!(user.id, 3);
        assert_eq!(user.nickname, "wang");
        let requests = server.requests();
        assert_eq!(requests[0].uri, "/api/user/login");
        assert_eq!(requests[0].headers["content-type"], FORM_URLENCODED);
        assert_eq!(requests[0].body, "phone=13900139000&code=8888");
        assert!(!handle.is_open());
    }
}
