//! End-to-end tests for the transfer pipeline against a real (temporary)
//! filesystem and an in-memory remote store.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::AsyncReadExt;

use rpa_traits::error::Result as CapResult;
use rpa_traits::fs::{ByteSink, FileMetadata, FileSystemAccess};
use rpa_traits::http::ByteStream;
use rpa_transfer::error::Result as TransferResult;
use rpa_transfer::{
    CreateRequest, DownloadSpec, RemoteDownload, RemoteLocator, RemoteStore, TransferError,
    TransferPipeline, UploadSpec,
};

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Temporary-directory filesystem for exercising real stream I/O.
struct TempFs {
    root: PathBuf,
    _dir: tempfile::TempDir,
}

impl TempFs {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        Self {
            root: dir.path().to_path_buf(),
            _dir: dir,
        }
    }
}

#[async_trait]
impl FileSystemAccess for TempFs {
    fn workspace_dir(&self) -> PathBuf {
        self.root.clone()
    }

    async fn exists(&self, path: &Path) -> CapResult<bool> {
        Ok(tokio::fs::try_exists(path).await?)
    }

    async fn metadata(&self, path: &Path) -> CapResult<FileMetadata> {
        let meta = tokio::fs::metadata(path).await?;
        Ok(FileMetadata {
            size: meta.len(),
            modified_at: None,
            is_directory: meta.is_dir(),
        })
    }

    async fn create_dir_all(&self, path: &Path) -> CapResult<()> {
        Ok(tokio::fs::create_dir_all(path).await?)
    }

    async fn read_file(&self, path: &Path) -> CapResult<Bytes> {
        Ok(Bytes::from(tokio::fs::read(path).await?))
    }

    async fn write_file(&self, path: &Path, data: Bytes) -> CapResult<()> {
        Ok(tokio::fs::write(path, &data).await?)
    }

    async fn delete_file(&self, path: &Path) -> CapResult<()> {
        Ok(tokio::fs::remove_file(path).await?)
    }

    async fn open_read_stream(&self, path: &Path) -> CapResult<ByteStream> {
        Ok(Box::new(tokio::fs::File::open(path).await?))
    }

    async fn open_write_stream(&self, path: &Path) -> CapResult<ByteSink> {
        Ok(Box::new(tokio::fs::File::create(path).await?))
    }
}

/// In-memory remote store recording uploads and serving canned objects.
#[derive(Default)]
struct FakeRemote {
    uploads: Mutex<Vec<(CreateRequest, Vec<u8>)>>,
    objects: HashMap<String, (String, Vec<u8>)>,
    exports: HashMap<String, Vec<u8>>,
    export_limit: Option<usize>,
    contacted: AtomicBool,
}

impl FakeRemote {
    fn with_object(mut self, id: &str, name: &str, data: &[u8]) -> Self {
        self.objects
            .insert(id.to_string(), (name.to_string(), data.to_vec()));
        self
    }

    fn with_export(mut self, id: &str, data: &[u8]) -> Self {
        self.exports.insert(id.to_string(), data.to_vec());
        self
    }

    fn with_export_limit(mut self, limit: usize) -> Self {
        self.export_limit = Some(limit);
        self
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    async fn create(&self, request: CreateRequest, mut body: ByteStream) -> TransferResult<String> {
        self.contacted.store(true, Ordering::SeqCst);
        let mut data = Vec::new();
        body.read_to_end(&mut data)
            .await
            .map_err(TransferError::StreamRead)?;

        let mut uploads = self.uploads.lock().unwrap();
        uploads.push((request, data));
        Ok(format!("remote-{}", uploads.len()))
    }

    async fn open_download(&self, locator: &RemoteLocator) -> TransferResult<RemoteDownload> {
        self.contacted.store(true, Ordering::SeqCst);
        match locator {
            RemoteLocator::FileId(id) => {
                let (name, data) = self.objects.get(id).ok_or(TransferError::Api {
                    status: 404,
                    message: format!("no such file: {}", id),
                })?;
                Ok(RemoteDownload {
                    name: Some(name.clone()),
                    stream: Box::new(std::io::Cursor::new(data.clone())),
                })
            }
            RemoteLocator::Url(_) => Ok(RemoteDownload {
                name: None,
                stream: Box::new(std::io::Cursor::new(b"url content".to_vec())),
            }),
        }
    }

    async fn open_export(&self, file_id: &str, _target_mime_type: &str) -> TransferResult<ByteStream> {
        self.contacted.store(true, Ordering::SeqCst);
        let data = self.exports.get(file_id).ok_or(TransferError::Api {
            status: 404,
            message: format!("no such file: {}", file_id),
        })?;
        if let Some(limit) = self.export_limit {
            if data.len() > limit {
                return Err(TransferError::ExportTooLarge(format!(
                    "conversion output exceeds {} bytes",
                    limit
                )));
            }
        }
        Ok(Box::new(std::io::Cursor::new(data.clone())))
    }
}

fn pipeline_with(remote: FakeRemote) -> (TransferPipeline, Arc<FakeRemote>, Arc<TempFs>) {
    let remote = Arc::new(remote);
    let fs = Arc::new(TempFs::new());
    let pipeline = TransferPipeline::new(remote.clone(), fs.clone());
    (pipeline, remote, fs)
}

#[tokio::test]
async fn upload_sniffs_type_when_none_declared() {
    let (pipeline, remote, fs) = pipeline_with(FakeRemote::default());

    let mut content = PNG_MAGIC.to_vec();
    content.extend(vec![0u8; 4096]);
    tokio::fs::write(fs.workspace_dir().join("chart.png"), &content)
        .await
        .unwrap();

    let id = pipeline
        .upload(UploadSpec {
            filename: "chart.png".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(id, "remote-1");
    let uploads = remote.uploads.lock().unwrap();
    let (request, data) = &uploads[0];
    assert_eq!(request.name, "chart.png");
    assert_eq!(request.source_mime_type, "image/png");
    // Sniffed prefix must be replayed: the remote sees every byte.
    assert_eq!(data, &content);
}

#[tokio::test]
async fn upload_declared_type_wins_and_skips_sniffing() {
    let (pipeline, remote, fs) = pipeline_with(FakeRemote::default());

    tokio::fs::write(fs.workspace_dir().join("data.csv"), b"a,b\n1,2\n")
        .await
        .unwrap();

    pipeline
        .upload(UploadSpec {
            filename: "data.csv".to_string(),
            dest_filename: Some("renamed.csv".to_string()),
            mime_type: Some("text/csv".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let uploads = remote.uploads.lock().unwrap();
    let (request, data) = &uploads[0];
    assert_eq!(request.name, "renamed.csv");
    assert_eq!(request.source_mime_type, "text/csv");
    assert_eq!(data, b"a,b\n1,2\n");
}

#[tokio::test]
async fn upload_missing_source_rejects_without_remote_contact() {
    let (pipeline, remote, _fs) = pipeline_with(FakeRemote::default());

    let result = pipeline
        .upload(UploadSpec {
            filename: "no-such-file.bin".to_string(),
            ..Default::default()
        })
        .await;

    assert!(result.is_err());
    assert!(!remote.contacted.load(Ordering::SeqCst));
}

#[tokio::test]
async fn download_uses_remote_name_when_no_filename_given() {
    let body: Vec<u8> = (0..100_000).map(|i| (i % 256) as u8).collect();
    let (pipeline, _remote, fs) =
        pipeline_with(FakeRemote::default().with_object("abc", "report.csv", &body));

    let filename = pipeline
        .download(DownloadSpec {
            file_id: Some("abc".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(filename, "report.csv");
    let written = tokio::fs::read(fs.workspace_dir().join("report.csv"))
        .await
        .unwrap();
    assert_eq!(written.len(), body.len());
    assert_eq!(written, body);
}

#[tokio::test]
async fn download_explicit_filename_overrides_remote_name() {
    let (pipeline, _remote, fs) =
        pipeline_with(FakeRemote::default().with_object("abc", "report.csv", b"x"));

    let filename = pipeline
        .download(DownloadSpec {
            file_id: Some("abc".to_string()),
            filename: Some("local.csv".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(filename, "local.csv");
    assert!(fs.workspace_dir().join("local.csv").exists());
}

#[tokio::test]
async fn download_by_url_requires_filename() {
    let (pipeline, remote, _fs) = pipeline_with(FakeRemote::default());

    let result = pipeline
        .download(DownloadSpec {
            url: Some("https://x/y".to_string()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(TransferError::InvalidParameter(_))));
    // Fails fast, before any remote I/O.
    assert!(!remote.contacted.load(Ordering::SeqCst));
}

#[tokio::test]
async fn download_without_locator_rejects() {
    let (pipeline, _remote, _fs) = pipeline_with(FakeRemote::default());

    let result = pipeline.download(DownloadSpec::default()).await;
    assert!(matches!(result, Err(TransferError::InvalidParameter(_))));
}

#[tokio::test]
async fn download_by_url_with_filename_succeeds() {
    let (pipeline, _remote, fs) = pipeline_with(FakeRemote::default());

    let filename = pipeline
        .download(DownloadSpec {
            url: Some("https://x/y".to_string()),
            filename: Some("fetched.bin".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(filename, "fetched.bin");
    let written = tokio::fs::read(fs.workspace_dir().join("fetched.bin"))
        .await
        .unwrap();
    assert_eq!(written, b"url content");
}

#[tokio::test]
async fn export_writes_converted_bytes() {
    let (pipeline, _remote, fs) =
        pipeline_with(FakeRemote::default().with_export("doc1", b"%PDF-1.4 fake"));

    pipeline
        .export("doc1", "application/pdf", "out.pdf")
        .await
        .unwrap();

    let written = tokio::fs::read(fs.workspace_dir().join("out.pdf"))
        .await
        .unwrap();
    assert_eq!(written, b"%PDF-1.4 fake");
}

#[tokio::test]
async fn export_size_limit_surfaces_verbatim() {
    let (pipeline, _remote, fs) = pipeline_with(
        FakeRemote::default()
            .with_export("doc1", &vec![0u8; 2048])
            .with_export_limit(1024),
    );

    let result = pipeline.export("doc1", "application/pdf", "out.pdf").await;

    assert!(matches!(result, Err(TransferError::ExportTooLarge(_))));
    // The sink was never opened, so no partial file exists.
    assert!(!fs.workspace_dir().join("out.pdf").exists());
}
