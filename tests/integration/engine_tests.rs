//! Engine lifecycle, payload handling and serialization tests.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use remocon::app::engine::TransmitEngine;
use remocon::app::events::{TransmitEvent, TransmitState};
use remocon::app::ports::{
    CarrierChannel, IndicatorState, PeripheralError, StatusIndicator, TimeSource,
};
use remocon::config::{CarrierConfig, EngineConfig};
use remocon::registry::CommandRegistry;
use remocon::Error;

use crate::mock_hw::{HwCall, MockHardware, RecordingSink};

type MockEngine = TransmitEngine<MockHardware, RecordingSink>;

fn engine() -> MockEngine {
    TransmitEngine::new(
        CommandRegistry::standard(),
        EngineConfig::default(),
        RecordingSink::new(),
    )
}

fn ready_engine() -> MockEngine {
    let engine = engine();
    engine.init(MockHardware::new()).unwrap();
    engine
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn init_configures_carrier_and_parks_indicator() {
    let engine = ready_engine();
    assert!(engine.is_initialized());
    assert!(engine.with_sink(|s| s.events.contains(&TransmitEvent::EngineReady)));

    let hw = engine.shutdown().unwrap();
    assert_eq!(hw.calls[0], HwCall::Configure(CarrierConfig::default()));
    assert_eq!(hw.calls[1], HwCall::Indicator(IndicatorState::Idle));
}

#[test]
fn init_failure_leaves_engine_uninitialized() {
    let engine = engine();
    let mut hw = MockHardware::new();
    hw.fail_configure = Some(-1);

    let err = engine.init(hw).unwrap_err();
    assert_eq!(err, Error::PeripheralUnavailable);
    assert!(!engine.is_initialized());
}

#[test]
fn send_before_init_is_unavailable() {
    let engine = engine();
    assert_eq!(engine.send("TV_KEY_POWER"), Err(Error::PeripheralUnavailable));
    assert_eq!(engine.send("UNKNOWN_CMD"), Err(Error::CommandNotFound));
    assert_eq!(engine.state(), TransmitState::Idle);
}

#[test]
fn shutdown_releases_hardware_idle() {
    let engine = ready_engine();
    engine.send("VA_KEY_CIRCLE").unwrap();

    let hw = engine.shutdown().unwrap();
    assert!(!hw.is_emitting());
    assert_eq!(hw.last_indicator(), Some(IndicatorState::Idle));
    assert!(!engine.is_initialized());
    assert!(engine.shutdown().is_none());
    assert_eq!(engine.send("VA_KEY_CIRCLE"), Err(Error::PeripheralUnavailable));
    assert!(engine.with_sink(|s| s.events.contains(&TransmitEvent::EngineShutdown)));
}

#[test]
fn reinit_after_shutdown() {
    let engine = ready_engine();
    let hw = engine.shutdown().unwrap();
    engine.init(hw).unwrap();
    assert!(engine.send("TV_KEY_LEFT").is_ok());
}

#[test]
fn configure_twice_is_harmless() {
    let engine = ready_engine();
    let mut hw = engine.shutdown().unwrap();
    hw.configure(&CarrierConfig::default()).unwrap();
    engine.init(hw).unwrap();
    engine.send("TV_KEY_RIGHT").unwrap();

    let hw = engine.shutdown().unwrap();
    assert_eq!(hw.frames().len(), 2);
}

// ── Payloads ──────────────────────────────────────────────────

#[test]
fn transmit_accepts_known_payload() {
    let engine = ready_engine();
    assert!(engine.transmit(b"TV_KEY_CHANNELUP"));
    assert!(engine.transmit(b"VA_KEY_SCHED\0garbage"));
    assert_eq!(
        engine.with_sink(|s| s.sent_names()),
        ["TV_KEY_CHANNELUP", "VA_KEY_SCHED"]
    );
}

#[test]
fn transmit_rejects_bad_payloads_without_hardware() {
    let engine = ready_engine();
    let long = [b'A'; 30];
    let payloads: [&[u8]; 6] = [
        b"",
        b"\0TV_KEY_POWER",
        &long,
        b"\xff\xfe",
        b"UNKNOWN_CMD",
        b"TV_KEY_POWER\n",
    ];
    for payload in payloads {
        assert!(!engine.transmit(payload), "{:?}", payload);
    }

    let hw = engine.shutdown().unwrap();
    // Only the init-time configure and indicator park.
    assert_eq!(hw.calls.len(), 2);
    assert!(engine.with_sink(|s| s.sent_names().is_empty()));
}

#[test]
fn transmit_failure_is_reported_to_sink() {
    let engine = ready_engine();
    assert!(!engine.transmit(b"NOPE"));
    assert!(engine.with_sink(|s| s.events.contains(&TransmitEvent::Failed {
        error: Error::CommandNotFound
    })));
}

// ── Serialization ─────────────────────────────────────────────

#[test]
fn concurrent_sends_do_not_interleave() {
    let engine = ready_engine();
    let names = ["TV_KEY_POWER", "VA_KEY_HOME", "TV_KEY_DOWN", "VA_KEY_UP"];

    thread::scope(|s| {
        for name in names {
            let engine = &engine;
            s.spawn(move || engine.send(name).unwrap());
        }
    });

    let hw = engine.shutdown().unwrap();
    // Every Active is closed by an Idle before the next Active, and the
    // carrier is never toggled outside an Active window.
    let mut active = false;
    for call in &hw.calls {
        match call {
            HwCall::Indicator(IndicatorState::Active) => {
                assert!(!active, "overlapping transmissions");
                active = true;
            }
            HwCall::Indicator(IndicatorState::Idle) => active = false,
            HwCall::Enable => assert!(active, "pulse outside a transmission"),
            _ => {}
        }
    }
    assert_eq!(hw.frames().len(), 2 + 1 + 2 + 1);
    assert_eq!(engine.with_sink(|s| s.sent_names().len()), names.len());
}

/// Parks the first delay until the test releases it.
struct GatedHardware {
    inner: MockHardware,
    started: Option<Sender<()>>,
    release: Receiver<()>,
}

impl CarrierChannel for GatedHardware {
    fn configure(&mut self, config: &CarrierConfig) -> Result<(), PeripheralError> {
        self.inner.configure(config)
    }

    fn enable(&mut self) -> Result<(), PeripheralError> {
        self.inner.enable()
    }

    fn disable(&mut self) -> Result<(), PeripheralError> {
        self.inner.disable()
    }

    fn is_configured(&self) -> bool {
        self.inner.is_configured()
    }
}

impl StatusIndicator for GatedHardware {
    fn set(&mut self, state: IndicatorState) {
        self.inner.set(state);
    }
}

impl TimeSource for GatedHardware {
    fn delay_micros(&mut self, micros: u32) {
        if let Some(started) = self.started.take() {
            let _ = started.send(());
            let _ = self.release.recv();
        }
        self.inner.delay_micros(micros);
    }
}

#[test]
fn try_send_while_busy_is_rejected() {
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let engine = TransmitEngine::new(
        CommandRegistry::standard(),
        EngineConfig::default(),
        RecordingSink::new(),
    );
    engine
        .init(GatedHardware {
            inner: MockHardware::new(),
            started: Some(started_tx),
            release: release_rx,
        })
        .unwrap();

    thread::scope(|s| {
        let running = s.spawn(|| engine.send("VA_KEY_START"));
        started_rx.recv().unwrap();

        assert_eq!(engine.try_send("TV_KEY_POWER"), Err(Error::Busy));

        release_tx.send(()).unwrap();
        assert!(running.join().unwrap().is_ok());
    });

    // Free again once the first transmission is done.
    assert!(engine.try_send("TV_KEY_POWER").is_ok());
    let hw = engine.shutdown().unwrap();
    assert_eq!(hw.inner.frames().len(), 1 + 2);
}

/// One of several handles onto the same physical carrier and LEDs.  Every
/// handle appends to one shared call log.
struct SharedBoard {
    log: Arc<Mutex<Vec<HwCall>>>,
    configured: bool,
    gate: Option<(Sender<()>, Receiver<()>)>,
}

impl SharedBoard {
    fn new(log: &Arc<Mutex<Vec<HwCall>>>) -> Self {
        Self {
            log: Arc::clone(log),
            configured: false,
            gate: None,
        }
    }

    fn record(&self, call: HwCall) {
        self.log.lock().unwrap().push(call);
    }
}

impl CarrierChannel for SharedBoard {
    fn configure(&mut self, config: &CarrierConfig) -> Result<(), PeripheralError> {
        self.record(HwCall::Configure(*config));
        self.configured = true;
        Ok(())
    }

    fn enable(&mut self) -> Result<(), PeripheralError> {
        self.record(HwCall::Enable);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), PeripheralError> {
        self.record(HwCall::Disable);
        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

impl StatusIndicator for SharedBoard {
    fn set(&mut self, state: IndicatorState) {
        self.record(HwCall::Indicator(state));
    }
}

impl TimeSource for SharedBoard {
    fn delay_micros(&mut self, micros: u32) {
        if let Some((started, release)) = self.gate.take() {
            let _ = started.send(());
            let _ = release.recv();
        }
        self.record(HwCall::Delay(micros));
    }
}

#[test]
fn reinit_waits_for_running_transmission() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();

    let engine = TransmitEngine::new(
        CommandRegistry::standard(),
        EngineConfig::default(),
        RecordingSink::new(),
    );
    let mut first = SharedBoard::new(&log);
    first.gate = Some((started_tx, release_rx));
    engine.init(first).unwrap();

    thread::scope(|s| {
        let running = s.spawn(|| engine.send("VA_KEY_START"));
        started_rx.recv().unwrap();

        let reinit = s.spawn(|| engine.init(SharedBoard::new(&log)));
        // Give the second init time to reach the engine lock.
        thread::sleep(Duration::from_millis(50));
        release_tx.send(()).unwrap();

        assert!(running.join().unwrap().is_ok());
        assert!(reinit.join().unwrap().is_ok());
    });

    let log = log.lock().unwrap();
    let active = log
        .iter()
        .position(|c| *c == HwCall::Indicator(IndicatorState::Active))
        .unwrap();
    let end = active
        + log[active..]
            .iter()
            .position(|c| *c == HwCall::Indicator(IndicatorState::Idle))
            .unwrap();

    // The whole frame went out untouched.
    let window = &log[active..end];
    assert!(!window.iter().any(|c| matches!(c, HwCall::Configure(_))));
    assert_eq!(window.iter().filter(|c| **c == HwCall::Enable).count(), 42);

    // Old handle released, then the new one configured and parked.
    let reconfigure = log
        .iter()
        .rposition(|c| matches!(c, HwCall::Configure(_)))
        .unwrap();
    assert!(reconfigure > end);
    assert_eq!(
        &log[reconfigure - 2..],
        [
            HwCall::Disable,
            HwCall::Indicator(IndicatorState::Idle),
            HwCall::Configure(CarrierConfig::default()),
            HwCall::Indicator(IndicatorState::Idle),
        ]
    );
    assert!(engine.is_initialized());
}

#[test]
fn reinit_releases_previous_hardware() {
    let engine = ready_engine();
    engine.send("TV_KEY_POWER").unwrap();
    engine.init(MockHardware::new()).unwrap();

    let events = engine.with_sink(|s| s.events.clone());
    let shutdown = events
        .iter()
        .position(|e| *e == TransmitEvent::EngineShutdown)
        .unwrap();
    assert_eq!(events[shutdown + 1], TransmitEvent::EngineReady);
}

#[test]
fn state_reports_idle_between_sends() {
    let engine = ready_engine();
    engine.send("TV_KEY_VOLUMEDOWN").unwrap();

    // Transmitting was passed through, but only the events saw it.
    assert_eq!(engine.state(), TransmitState::Idle);
    assert!(engine.with_sink(|s| s.events.iter().any(|e| matches!(
        e,
        TransmitEvent::StateChanged {
            to: TransmitState::Transmitting,
            ..
        }
    ))));
}
