//! Download routine against a mocked image host and a temp directory.

use pretty_assertions::assert_eq;
use random_image::{
    Config, DownloadOptions, Downloader, ImageError, ImageOptions, ImageResult, RandomImage,
    UnsplashProvider,
};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00];

async fn serve(mock_server: &MockServer, route: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(mock_server)
        .await;
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_download_uses_url_segment_and_returns_absolute_path() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/photos/lake.jpg", JPEG_BYTES).await;

    let dir = tempfile::tempdir().unwrap();
    let downloader = Downloader::new(&Config::default());
    let url = format!("{}/photos/lake.jpg", mock_server.uri());

    let saved = downloader
        .download(&url, dir.path(), &DownloadOptions::default())
        .await
        .unwrap();

    assert!(saved.is_absolute());
    assert_eq!(saved.file_name().unwrap(), "lake.jpg");
    assert_eq!(std::fs::read(&saved).unwrap(), JPEG_BYTES);
    assert_eq!(entries(dir.path()), vec!["lake.jpg"]);
}

#[tokio::test]
async fn test_download_refuses_to_overwrite() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/a.png", b"first").await;

    let dir = tempfile::tempdir().unwrap();
    let downloader = Downloader::default();
    let url = format!("{}/a.png", mock_server.uri());
    let options = DownloadOptions::default();

    let first = downloader.download(&url, dir.path(), &options).await.unwrap();
    let err = downloader.download(&url, dir.path(), &options).await.unwrap_err();

    match err {
        ImageError::FileExists { path } => assert_eq!(path, first),
        other => panic!("expected FileExists, got {other:?}"),
    }
    assert_eq!(std::fs::read(&first).unwrap(), b"first");
}

#[tokio::test]
async fn test_download_overwrite_replaces_contents() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/a.png", b"fresh bytes").await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.png"), b"stale").unwrap();

    let url = format!("{}/a.png", mock_server.uri());
    let saved = Downloader::default()
        .download(&url, dir.path(), &DownloadOptions::default().overwrite(true))
        .await
        .unwrap();

    assert_eq!(std::fs::read(saved).unwrap(), b"fresh bytes");
    assert_eq!(entries(dir.path()), vec!["a.png"]);
}

#[tokio::test]
async fn test_explicit_filename_is_the_basename() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/photo-123", JPEG_BYTES).await;

    let dir = tempfile::tempdir().unwrap();
    let url = format!("{}/photo-123", mock_server.uri());
    let downloader = Downloader::default();

    let named = downloader
        .download(&url, dir.path(), &DownloadOptions::default().filename("cover.webp"))
        .await
        .unwrap();
    assert_eq!(named.file_name().unwrap(), "cover.webp");

    let forced = downloader
        .download(&url, dir.path(), &DownloadOptions::default().filename("cover"))
        .await
        .unwrap();
    assert_eq!(forced.file_name().unwrap(), "cover.jpg");
}

#[tokio::test]
async fn test_segment_without_extension_is_saved_as_jpg() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/photo-123", JPEG_BYTES).await;

    let dir = tempfile::tempdir().unwrap();
    let url = format!("{}/photo-123?w=800&h=600", mock_server.uri());

    let saved = Downloader::default()
        .download(&url, dir.path(), &DownloadOptions::default())
        .await
        .unwrap();

    assert_eq!(saved.file_name().unwrap(), "photo-123.jpg");
}

#[tokio::test]
async fn test_synthesized_name_when_not_keeping_original() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/img/sunset.png", JPEG_BYTES).await;

    let dir = tempfile::tempdir().unwrap();
    let url = format!("{}/img/sunset.png", mock_server.uri());

    let saved = Downloader::default()
        .download(
            &url,
            dir.path(),
            &DownloadOptions::default().keep_original_name(false),
        )
        .await
        .unwrap();

    let name = saved.file_name().unwrap().to_string_lossy().into_owned();
    assert_ne!(name, "sunset.png");
    assert!(name.ends_with(".png"));
}

#[tokio::test]
async fn test_creates_missing_and_accepts_existing_directories() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/one.jpg", JPEG_BYTES).await;
    serve(&mock_server, "/two.jpg", JPEG_BYTES).await;

    let root = tempfile::tempdir().unwrap();
    let nested = root.path().join("a").join("b");
    let downloader = Downloader::default();
    let options = DownloadOptions::default();

    downloader
        .download(&format!("{}/one.jpg", mock_server.uri()), &nested, &options)
        .await
        .unwrap();
    downloader
        .download(&format!("{}/two.jpg", mock_server.uri()), &nested, &options)
        .await
        .unwrap();

    assert_eq!(entries(&nested), vec!["one.jpg", "two.jpg"]);
}

#[tokio::test]
async fn test_http_error_leaves_no_file_behind() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let url = format!("{}/missing.jpg", mock_server.uri());

    let err = Downloader::default()
        .download(&url, dir.path(), &DownloadOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ImageError::Transport(_)));
    assert!(entries(dir.path()).is_empty());
}

#[tokio::test]
async fn test_unreachable_host_leaves_no_file_behind() {
    let dir = tempfile::tempdir().unwrap();

    let err = Downloader::default()
        .download("http://127.0.0.1:9/x.jpg", dir.path(), &DownloadOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ImageError::Transport(_)));
    assert!(entries(dir.path()).is_empty());
}

/// Answers one request with a 100000-byte `Content-Length`, sends 10 bytes and hangs up.
async fn truncating_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await.unwrap();
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100000\r\n\r\n0123456789")
            .await
            .unwrap();
        socket.flush().await.unwrap();
    });

    format!("http://{addr}/cut.jpg")
}

#[tokio::test]
async fn test_truncated_body_leaves_no_file_behind() {
    let url = truncating_server().await;
    let dir = tempfile::tempdir().unwrap();

    let err = Downloader::default()
        .download(&url, dir.path(), &DownloadOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ImageError::Transport(_)));
    assert!(entries(dir.path()).is_empty());
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/new.jpg", JPEG_BYTES).await;

    Mock::given(method("GET"))
        .and(path("/old.jpg"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/new.jpg", mock_server.uri())),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let url = format!("{}/old.jpg", mock_server.uri());

    let saved = Downloader::default()
        .download(&url, dir.path(), &DownloadOptions::default())
        .await
        .unwrap();

    assert_eq!(saved.file_name().unwrap(), "old.jpg");
    assert_eq!(std::fs::read(&saved).unwrap(), JPEG_BYTES);
    assert_eq!(entries(dir.path()), vec!["old.jpg"]);
}

/// Two downloads racing on one destination never mix their bytes.
#[tokio::test]
async fn test_concurrent_downloads_to_same_destination() {
    let mock_server = MockServer::start().await;
    let large = vec![b'A'; 4 * 1024 * 1024];
    let small = vec![b'B'; 2 * 1024 * 1024];
    serve(&mock_server, "/a.jpg", &large).await;
    serve(&mock_server, "/b.jpg", &small).await;

    let dir = tempfile::tempdir().unwrap();
    let downloader = Downloader::default();
    let options = DownloadOptions::default().filename("wall.jpg").overwrite(true);
    let url_a = format!("{}/a.jpg", mock_server.uri());
    let url_b = format!("{}/b.jpg", mock_server.uri());

    let (first, second) = tokio::join!(
        downloader.download(&url_a, dir.path(), &options),
        downloader.download(&url_b, dir.path(), &options),
    );
    let first = first.unwrap();
    assert_eq!(first, second.unwrap());

    let saved = std::fs::read(&first).unwrap();
    assert!(saved == large || saved == small);
    assert_eq!(entries(dir.path()), vec!["wall.jpg"]);
}

#[cfg(unix)]
#[tokio::test]
async fn test_existence_check_failure_is_reported() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/x.jpg", JPEG_BYTES).await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("blocker"), b"not a directory").unwrap();
    let url = format!("{}/x.jpg", mock_server.uri());

    let err = Downloader::default()
        .download(&url, dir.path(), &DownloadOptions::default().filename("blocker/x.jpg"))
        .await
        .unwrap_err();

    match err {
        ImageError::Write { path, .. } => assert_eq!(path, dir.path().join("blocker/x.jpg")),
        other => panic!("expected Write, got {other:?}"),
    }
    assert_eq!(entries(dir.path()), vec!["blocker"]);
}

#[tokio::test]
async fn test_invalid_url() {
    let dir = tempfile::tempdir().unwrap();

    let err = Downloader::default()
        .download("::not-a-url::", dir.path(), &DownloadOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ImageError::InvalidUrl { .. }));
}

/// The facade accepts a full result as well as a bare URL.
#[tokio::test]
async fn test_facade_downloads_fetched_image() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/cdn/photo-9.jpg", JPEG_BYTES).await;

    let image_url = format!("{}/cdn/photo-9.jpg", mock_server.uri());
    let api_body = serde_json::json!({
        "width": 100,
        "height": 50,
        "urls": { "raw": image_url },
        "links": { "html": "https://unsplash.com/photos/9" },
        "user": { "name": "Ann" }
    });
    Mock::given(method("GET"))
        .and(path("/photos/random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_body))
        .mount(&mock_server)
        .await;

    let fetcher = RandomImage::new(UnsplashProvider::with_base_url("k", mock_server.uri()));
    let image: ImageResult = fetcher.get_random(&ImageOptions::new()).await.unwrap();
    assert_eq!(image.url, image_url);

    let dir = tempfile::tempdir().unwrap();
    let from_image = fetcher
        .download(&image, dir.path(), &DownloadOptions::default())
        .await
        .unwrap();
    let from_url = fetcher
        .download(
            &image.url,
            dir.path(),
            &DownloadOptions::default().filename("copy.jpg"),
        )
        .await
        .unwrap();

    assert_eq!(from_image.file_name().unwrap(), "photo-9.jpg");
    assert_eq!(std::fs::read(from_url).unwrap(), JPEG_BYTES);
}
