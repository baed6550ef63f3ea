//! Tests for the remote listing call: URL construction and parsing.

use std::sync::Arc;

use crate::downloader::test_helpers::{MockTransport, mock_downloader};

const ROOT_LISTING: &str = "\
drwxr-xr-x   2 ftp anonymous 4096 Mar  1 2023 sub
-rw-r--r--   1 ftp anonymous  100 Mar 12 2023 alu1.gz
";

#[tokio::test]
async fn list_requests_root_with_trailing_slash() {
    let transport = Arc::new(MockTransport::new());
    transport.add_listing("ftp://mock.example.org/db/", ROOT_LISTING);
    let downloader = mock_downloader(Arc::clone(&transport));

    let (files, dirs) = downloader.list("").await.unwrap();

    assert_eq!(transport.requests(), vec!["ftp://mock.example.org/db/"]);
    assert_eq!(files.len(), 1);
    assert_eq!(dirs.len(), 1);
    assert_eq!(files[0].name, "alu1.gz");
    assert_eq!(dirs[0].name, "sub");
}

#[tokio::test]
async fn list_appends_relative_directory_to_root() {
    let transport = Arc::new(MockTransport::new());
    transport.add_listing(
        "ftp://mock.example.org/db/sub/nested/",
        "-rw-r--r-- 1 ftp anonymous 1 Mar 1 2023 x.fa",
    );
    let downloader = mock_downloader(Arc::clone(&transport));

    let (files, dirs) = downloader.list("sub/nested").await.unwrap();

    assert_eq!(
        transport.requests(),
        vec!["ftp://mock.example.org/db/sub/nested/"]
    );
    assert_eq!(files.len(), 1);
    assert!(dirs.is_empty());
}

#[tokio::test]
async fn list_propagates_transport_errors() {
    let transport = Arc::new(MockTransport::new());
    let downloader = mock_downloader(transport);

    let result = downloader.list("missing").await;

    assert!(result.is_err());
}
