// src/scanner.rs

pub mod camera;
pub use camera::{Camera, CameraConstraints, CameraError, FacingMode, FrameDecoder, MediaStream};

pub mod payload;
pub use payload::{dashboard_path, equipment_qr_text, ScanPayload};

pub mod session;
pub use session::{ScannerSession, ScannerState, TransitionError};
