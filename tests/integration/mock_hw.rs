//! Mock hardware adapter for integration tests.
//!
//! Records every carrier, indicator and delay call so tests can assert on
//! the full pulse schedule against a virtual clock, without touching real
//! GPIO/PWM registers or sleeping.

use remocon::app::events::TransmitEvent;
use remocon::app::ports::{
    CarrierChannel, EventSink, IndicatorState, PeripheralError, StatusIndicator, TimeSource,
};
use remocon::config::CarrierConfig;
use remocon::protocol::Pulse;

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Configure(CarrierConfig),
    Enable,
    Disable,
    Indicator(IndicatorState),
    Delay(u32),
}

/// What the receiver would see: pulses, delays between them that belong
/// to no pulse (repeat gaps), and the end of each transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Emission {
    Pulse(Pulse),
    Gap(u32),
    End,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    pub configured: Option<CarrierConfig>,
    /// Fail the enable after this many successful enables.
    pub fail_enable_after: Option<usize>,
    /// Fail `configure` with this code.
    pub fail_configure: Option<i32>,
    enables: usize,
    emitting: bool,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            configured: None,
            fail_enable_after: None,
            fail_configure: None,
            enables: 0,
            emitting: false,
        }
    }

    /// Already configured with the default carrier.
    pub fn ready() -> Self {
        let mut hw = Self::new();
        hw.configured = Some(CarrierConfig::default());
        hw
    }

    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn indicator_calls(&self) -> Vec<IndicatorState> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HwCall::Indicator(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn last_indicator(&self) -> Option<IndicatorState> {
        self.indicator_calls().last().copied()
    }

    pub fn carrier_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, HwCall::Enable | HwCall::Disable | HwCall::Configure(_)))
            .count()
    }

    /// Rebuild the emitted schedule from the call log.
    pub fn emissions(&self) -> Vec<Emission> {
        let mut out = Vec::new();
        let mut mark: Option<u32> = None;
        let mut in_mark = false;
        let mut awaiting_space = false;

        for call in &self.calls {
            match call {
                HwCall::Enable => {
                    in_mark = true;
                    mark = None;
                }
                HwCall::Delay(us) if in_mark => {
                    mark = Some(*us);
                }
                HwCall::Disable if in_mark => {
                    in_mark = false;
                    awaiting_space = true;
                }
                HwCall::Delay(us) if awaiting_space => {
                    out.push(Emission::Pulse(Pulse::new(mark.unwrap_or(0), *us)));
                    awaiting_space = false;
                }
                HwCall::Delay(us) => out.push(Emission::Gap(*us)),
                HwCall::Indicator(IndicatorState::Idle) => out.push(Emission::End),
                _ => {}
            }
        }
        out
    }

    /// Emitted frames, split at repeat gaps and transmission ends.
    pub fn frames(&self) -> Vec<Vec<Pulse>> {
        let mut frames = vec![Vec::new()];
        for e in self.emissions() {
            match e {
                Emission::Pulse(p) => frames.last_mut().unwrap().push(p),
                Emission::Gap(_) | Emission::End => frames.push(Vec::new()),
            }
        }
        frames.retain(|f| !f.is_empty());
        frames
    }

    pub fn gaps(&self) -> Vec<u32> {
        self.emissions()
            .into_iter()
            .filter_map(|e| match e {
                Emission::Gap(us) => Some(us),
                Emission::Pulse(_) | Emission::End => None,
            })
            .collect()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl CarrierChannel for MockHardware {
    fn configure(&mut self, config: &CarrierConfig) -> Result<(), PeripheralError> {
        self.calls.push(HwCall::Configure(*config));
        if let Some(rc) = self.fail_configure {
            return Err(PeripheralError::ClaimFailed(rc));
        }
        self.configured = Some(*config);
        Ok(())
    }

    fn enable(&mut self) -> Result<(), PeripheralError> {
        if self.configured.is_none() {
            return Err(PeripheralError::NotConfigured);
        }
        if self.fail_enable_after.is_some_and(|n| self.enables >= n) {
            return Err(PeripheralError::WriteFailed(0x103));
        }
        assert!(!self.emitting, "carrier enabled twice without a disable");
        self.calls.push(HwCall::Enable);
        self.enables += 1;
        self.emitting = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), PeripheralError> {
        if self.configured.is_none() {
            return Err(PeripheralError::NotConfigured);
        }
        self.calls.push(HwCall::Disable);
        self.emitting = false;
        Ok(())
    }

    fn is_configured(&self) -> bool {
        self.configured.is_some()
    }
}

impl StatusIndicator for MockHardware {
    fn set(&mut self, state: IndicatorState) {
        self.calls.push(HwCall::Indicator(state));
    }
}

impl TimeSource for MockHardware {
    fn delay_micros(&mut self, micros: u32) {
        self.calls.push(HwCall::Delay(micros));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<TransmitEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn sent_names(&self) -> Vec<&'static str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TransmitEvent::Sent { command, .. } => Some(command.name),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &TransmitEvent) {
        self.events.push(event.clone());
    }
}
