use axum::Router;

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn serve_local(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind a local port");
    let addr = listener.local_addr().expect("read the bound address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("serve the test router");
    });

    format!("http://{addr}")
}
