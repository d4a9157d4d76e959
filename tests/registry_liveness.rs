//! Registry liveness: site directories added or removed on disk become
//! visible within one refresh interval, without a restart.

mod common;

use std::time::Duration;

use common::{start_server_with, write_site_file};
use sitehost::HostConfig;

#[tokio::test]
async fn new_and_removed_sites_become_visible_within_one_interval() {
    let sites = tempfile::tempdir().unwrap();
    write_site_file(sites.path(), "first.test", "index.html", "first");

    let mut config = HostConfig::default();
    config.sites.root = sites.path().to_path_buf();
    config.sites.refresh_secs = 1;
    let addr = start_server_with(config).await;

    let client = reqwest::Client::new();
    let get = |host: &'static str| {
        let client = client.clone();
        async move {
            client
                .get(format!("http://{addr}/"))
                .header("x-forwarded-host", host)
                .send()
                .await
                .unwrap()
        }
    };

    assert_eq!(get("first.test").await.status(), 200);
    assert_eq!(get("second.test").await.status(), 404);

    // A new site appears on disk mid-flight.
    write_site_file(sites.path(), "second.test", "index.html", "second");
    std::fs::remove_dir_all(sites.path().join("first.test")).unwrap();
    tokio::time::sleep(Duration::from_millis(1800)).await;

    let response = get("second.test").await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "second");

    let response = get("first.test").await;
    assert_eq!(response.status(), 404);
    assert_eq!(
        response.text().await.unwrap(),
        "404: Not Found - unknown site: first.test"
    );
}
