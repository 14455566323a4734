use rand::Rng;

pub const PROTOCOL_STEPS: [&str; 6] = [
    "Target Acquired",
    "Pose Estimation",
    "Calculating Trajectory",
    "Servo Alignment",
    "Authorization Check",
    "Engagement Ready",
];
const PROTOCOL_RESTART_STEP: usize = 2;
const MAX_TARGETS: u8 = 3;

const FPS_EVERY: u64 = 2;
const TARGETS_EVERY: u64 = 6;
const RANGE_EVERY: u64 = 3;
const CONFIDENCE_EVERY: u64 = 4;
const TELEMETRY_EVERY: u64 = 2;
const PROTOCOL_EVERY: u64 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    pub fps: u32,
    pub targets: u8,
    pub range_m: f64,
    pub confidence: [u8; 2],
    pub latency_ms: f64,
    pub telemetry_range_m: f64,
    pub azimuth_deg: i32,
    pub elevation_deg: i32,
    pub power_w: f64,
    pub protocol_step: usize,
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self {
            fps: 30,
            targets: 2,
            range_m: 15.2,
            confidence: [96, 89],
            latency_ms: 12.0,
            telemetry_range_m: 23.4,
            azimuth_deg: 45,
            elevation_deg: 12,
            power_w: 24.7,
            protocol_step: PROTOCOL_RESTART_STEP,
        }
    }
}

impl TelemetrySnapshot {
    pub fn step_state(&self, index: usize) -> StepState {
        match index.cmp(&self.protocol_step) {
            std::cmp::Ordering::Less => StepState::Completed,
            std::cmp::Ordering::Equal => StepState::Active,
            std::cmp::Ordering::Greater => StepState::Pending,
        }
    }

    pub fn servo_label(&self) -> String {
        let sign = if self.elevation_deg >= 0 { "+" } else { "" };
        format!(
            "Az: {:03}° El: {sign}{}°",
            self.azimuth_deg, self.elevation_deg
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct TelemetrySimulation {
    running: bool,
    ticks: u64,
    snapshot: TelemetrySnapshot,
}

impl TelemetrySimulation {
    /// Restarts from the baseline readings.
    pub fn start(&mut self) {
        self.running = true;
        self.ticks = 0;
        self.snapshot = TelemetrySnapshot::default();
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn snapshot(&self) -> &TelemetrySnapshot {
        &self.snapshot
    }

    /// Returns whether any reading changed.
    pub fn tick(&mut self, rng: &mut impl Rng) -> bool {
        if !self.running {
            return false;
        }
        self.ticks = self.ticks.wrapping_add(1);
        let due = |every: u64| self.ticks % every == 0;
        let (fps, targets, range, confidence, telemetry, protocol) = (
            due(FPS_EVERY),
            due(TARGETS_EVERY),
            due(RANGE_EVERY),
            due(CONFIDENCE_EVERY),
            due(TELEMETRY_EVERY),
            due(PROTOCOL_EVERY),
        );

        let s = &mut self.snapshot;
        if fps {
            s.fps = (30i32 + rng.gen_range(-2..=2)).clamp(25, 35) as u32;
        }
        if targets {
            s.targets = rng.gen_range(0..=MAX_TARGETS);
        }
        if range {
            s.range_m = (15.2f64 + rng.gen_range(-1.0..1.0)).clamp(10.0, 25.0);
        }
        if confidence {
            for (value, base) in s.confidence.iter_mut().zip([96i32, 89]) {
                *value = (base + rng.gen_range(-3..3)).clamp(80, 99) as u8;
            }
        }
        if telemetry {
            s.latency_ms = (s.latency_ms + rng.gen_range(-2.0..2.0)).clamp(8.0, 20.0);
            s.telemetry_range_m =
                (s.telemetry_range_m + rng.gen_range(-1.5..1.5)).clamp(15.0, 30.0);
            s.azimuth_deg = (s.azimuth_deg + rng.gen_range(-5..5)).rem_euclid(360);
            s.elevation_deg = (s.elevation_deg + rng.gen_range(-4..4)).clamp(-15, 45);
            s.power_w = (s.power_w + rng.gen_range(-1.0..1.0)).clamp(20.0, 30.0);
        }
        if protocol {
            s.protocol_step = (s.protocol_step + 1) % PROTOCOL_STEPS.len();
            if s.protocol_step == 0 {
                s.protocol_step = PROTOCOL_RESTART_STEP;
            }
        }

        fps || targets || range || confidence || telemetry || protocol
    }
}

pub fn confidence_band(value: u8) -> ConfidenceBand {
    if value < 85 {
        ConfidenceBand::Low
    } else if value < 95 {
        ConfidenceBand::Medium
    } else {
        ConfidenceBand::High
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}
