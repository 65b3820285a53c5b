pub mod upload;

pub use upload::UploadService;
