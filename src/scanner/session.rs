// src/scanner/session.rs

use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;

use super::{
    camera::{Camera, CameraConstraints, CameraError, FrameDecoder, MediaStream},
    payload::ScanPayload,
};

/// Intervalo entre quadros (~60 fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannerState {
    Idle,
    RequestingCamera,
    Scanning,
    Decoded(ScanPayload),
    Error(CameraError),
}

impl ScannerState {
    fn name(&self) -> &'static str {
        match self {
            ScannerState::Idle => "idle",
            ScannerState::RequestingCamera => "requesting_camera",
            ScannerState::Scanning => "scanning",
            ScannerState::Decoded(_) => "decoded",
            ScannerState::Error(_) => "error",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Transição inválida: '{action}' no estado '{state}'")]
pub struct TransitionError {
    pub action: &'static str,
    pub state: &'static str,
}

/// Leitor de QR: abre a câmera, lê quadros até decodificar e devolve a câmera
/// em toda saída do estado `Scanning`.
pub struct ScannerSession<C, D> {
    camera: C,
    decoder: D,
    constraints: CameraConstraints,
    frame_interval: Duration,
    stream: Option<Box<dyn MediaStream>>,
    state: ScannerState,
}

impl<C: Camera, D: FrameDecoder> ScannerSession<C, D> {
    pub fn new(camera: C, decoder: D) -> Self {
        Self {
            camera,
            decoder,
            constraints: CameraConstraints::default(),
            frame_interval: FRAME_INTERVAL,
            stream: None,
            state: ScannerState::Idle,
        }
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    /// Trilhas ainda abertas (0 quando nenhuma câmera está presa).
    pub fn active_tracks(&self) -> usize {
        self.stream.as_ref().map_or(0, |s| s.active_tracks())
    }

    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!("Câmera liberada");
        }
    }

    fn fail(&mut self, error: CameraError) {
        self.release();
        tracing::warn!(error = %error, "Leitor QR em erro");
        self.state = ScannerState::Error(error);
    }

    fn invalid(&self, action: &'static str) -> TransitionError {
        TransitionError { action, state: self.state.name() }
    }

    /// Idle | Decoded -> RequestingCamera -> Scanning | Error
    ///
    /// Reabrir depois de uma leitura volta a `Idle` antes. De `Error` só com `retry`.
    pub async fn open(&mut self) -> Result<&ScannerState, TransitionError> {
        match self.state {
            ScannerState::Idle => {}
            ScannerState::Decoded(_) => self.close(),
            _ => return Err(self.invalid("open")),
        }

        self.state = ScannerState::RequestingCamera;
        match self.camera.acquire(&self.constraints).await {
            Ok(stream) => {
                self.stream = Some(stream);
                self.state = ScannerState::Scanning;
            }
            Err(e) => self.fail(e),
        }
        Ok(&self.state)
    }

    /// Um passo de amostragem: captura um quadro e tenta decodificar.
    pub async fn step(&mut self) -> &ScannerState {
        if self.state != ScannerState::Scanning {
            return &self.state;
        }
        let Some(stream) = self.stream.as_mut() else {
            self.fail(CameraError::Other("stream ausente".to_string()));
            return &self.state;
        };
        if !stream.is_ready() {
            return &self.state;
        }

        match stream.capture_frame().await {
            Ok(Some(frame)) => {
                if let Some(text) = self.decoder.decode(&frame) {
                    self.release();
                    let payload = ScanPayload::parse(&text);
                    tracing::info!(payload = ?payload, "QR decodificado");
                    self.state = ScannerState::Decoded(payload);
                }
            }
            Ok(None) => {}
            Err(e) => self.fail(e),
        }
        &self.state
    }

    /// Lê um quadro por intervalo até decodificar, falhar ou receber cancelamento.
    /// Cancelar (ou derrubar o emissor) fecha o leitor.
    pub async fn run(&mut self, mut cancel: watch::Receiver<bool>) -> &ScannerState {
        let mut ticker = tokio::time::interval(self.frame_interval);

        while self.state == ScannerState::Scanning {
            if *cancel.borrow_and_update() {
                self.close();
                break;
            }

            tokio::select! {
                changed = cancel.changed() => {
                    if changed.is_err() || *cancel.borrow() {
                        self.close();
                    }
                }
                _ = ticker.tick() => {
                    self.step().await;
                }
            }
        }
        &self.state
    }

    /// Fechamento manual: solta a câmera e volta a `Idle`.
    pub fn close(&mut self) {
        self.release();
        self.state = ScannerState::Idle;
    }

    /// Entrada digitada; mesmo parser da câmera.
    pub fn submit_manual(&mut self, text: &str) -> &ScannerState {
        self.release();
        self.state = ScannerState::Decoded(ScanPayload::parse(text));
        &self.state
    }

    /// Só a partir de `Error`: tenta abrir a câmera de novo.
    pub async fn retry(&mut self) -> Result<&ScannerState, TransitionError> {
        if !matches!(self.state, ScannerState::Error(_)) {
            return Err(self.invalid("retry"));
        }
        self.state = ScannerState::Idle;
        self.open().await
    }
}

impl<C, D> Drop for ScannerSession<C, D> {
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
        }
    }
}
