//! Transmit engine — single owner of the IR hardware.
//!
//! The carrier and the indicator are shared singletons on the board.  The
//! engine owns them together with the orchestrator behind one mutex, so
//! every transmission has exclusive use of the hardware from first header
//! pulse to last stop space.  Callers on other threads (network callbacks,
//! console) either queue on [`send`](TransmitEngine::send) or are turned
//! away by [`try_send`](TransmitEngine::try_send).

use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use log::{info, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::registry::{Command, CommandRegistry};

use super::commands::parse_payload;
use super::events::{TransmitEvent, TransmitState};
use super::ports::{EventSink, IndicatorState, TransmitHardware};
use super::service::TransmitOrchestrator;

struct EngineInner<H, E> {
    orchestrator: TransmitOrchestrator,
    /// `None` before `init()` and after `shutdown()`.
    hw: Option<H>,
    sink: E,
}

pub struct TransmitEngine<H, E> {
    config: EngineConfig,
    inner: Mutex<EngineInner<H, E>>,
}

impl<H: TransmitHardware, E: EventSink> TransmitEngine<H, E> {
    /// Build the engine.  No hardware is touched until [`init`](Self::init).
    pub fn new(registry: CommandRegistry, config: EngineConfig, sink: E) -> Self {
        let orchestrator = TransmitOrchestrator::new(registry, &config);
        Self {
            config,
            inner: Mutex::new(EngineInner {
                orchestrator,
                hw: None,
                sink,
            }),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Configure the carrier, park the indicator at idle and take ownership
    /// of the hardware.
    ///
    /// Waits for a running transmission to finish.  Previously installed
    /// hardware is released first (carrier off, indicator idle), since both
    /// handles drive the same peripherals.  On a configure failure the engine
    /// is left uninitialised.
    pub fn init(&self, mut hw: H) -> Result<()> {
        let mut inner = self.lock();
        if inner.hw.is_some() {
            warn!("engine: re-initialised, releasing previous hardware");
            drop(Self::release_locked(&mut inner));
        }

        hw.configure(&self.config.carrier)?;
        hw.set(IndicatorState::Idle);
        inner.hw = Some(hw);
        inner.sink.emit(&TransmitEvent::EngineReady);
        info!(
            "engine: ready (carrier {} Hz, {}% duty, {:?})",
            self.config.carrier.frequency_hz,
            self.config.carrier.duty_percent,
            self.config.carrier.polarity
        );
        Ok(())
    }

    /// Turn the carrier off, park the indicator and hand the hardware back.
    /// Waits for a running transmission to finish first.
    pub fn shutdown(&self) -> Option<H> {
        Self::release_locked(&mut self.lock())
    }

    pub fn is_initialized(&self) -> bool {
        self.lock().hw.is_some()
    }

    // ── Transmission ──────────────────────────────────────────

    /// Transmit `name`, waiting for any transmission already in progress.
    pub fn send(&self, name: &str) -> Result<&'static Command> {
        let mut inner = self.lock();
        Self::send_locked(&mut inner, name)
    }

    /// Transmit `name` unless another transmission holds the hardware.
    pub fn try_send(&self, name: &str) -> Result<&'static Command> {
        let mut inner = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                warn!("engine: busy, rejecting {:?}", name);
                return Err(Error::Busy);
            }
            Err(TryLockError::Poisoned(p)) => p.into_inner(),
        };
        Self::send_locked(&mut inner, name)
    }

    /// Inbound entry point for raw command payloads.
    ///
    /// Returns `true` only when a known command was transmitted completely.
    pub fn transmit(&self, payload: &[u8]) -> bool {
        let name = match parse_payload(payload, self.config.max_command_len) {
            Ok(name) => name,
            Err(e) => {
                warn!("engine: payload rejected: {}", e);
                self.lock()
                    .sink
                    .emit(&TransmitEvent::Failed { error: Error::CommandNotFound });
                return false;
            }
        };
        match self.send(&name) {
            Ok(_) => true,
            Err(e) => {
                warn!("engine: cmd [{}] send failed: {}", name, e);
                false
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Orchestrator state snapshot, for diagnostics only.
    ///
    /// Takes the engine lock, so it waits out a running transmission and
    /// observes `Idle` between sends.  Live progress is reported through
    /// [`TransmitEvent::StateChanged`].
    pub fn state(&self) -> TransmitState {
        self.lock().orchestrator.state()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> CommandRegistry {
        *self.lock().orchestrator.registry()
    }

    /// Run `f` against the event sink (tests and diagnostics).
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        f(&mut self.lock().sink)
    }

    // ── Internal ──────────────────────────────────────────────

    fn send_locked(inner: &mut EngineInner<H, E>, name: &str) -> Result<&'static Command> {
        let EngineInner {
            orchestrator,
            hw,
            sink,
        } = inner;
        match hw {
            Some(hw) => orchestrator.send(name, hw, sink),
            None => {
                // Resolve first so unknown names report as such.
                if orchestrator.registry().lookup(name).is_none() {
                    sink.emit(&TransmitEvent::Failed { error: Error::CommandNotFound });
                    return Err(Error::CommandNotFound);
                }
                warn!("engine: not initialised, dropping {:?}", name);
                sink.emit(&TransmitEvent::Failed { error: Error::PeripheralUnavailable });
                Err(Error::PeripheralUnavailable)
            }
        }
    }

    fn release_locked(inner: &mut EngineInner<H, E>) -> Option<H> {
        let mut hw = inner.hw.take()?;
        if let Err(e) = hw.disable() {
            warn!("engine: carrier disable on release failed: {}", e);
        }
        hw.set(IndicatorState::Idle);
        inner.sink.emit(&TransmitEvent::EngineShutdown);
        info!("engine: hardware released");
        Some(hw)
    }

    /// Poisoning is ignored: every send starts from a fresh lookup.
    fn lock(&self) -> MutexGuard<'_, EngineInner<H, E>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
