//! Streaming per-channel audio pipeline (§4.H): compressor -> 3-band EQ
//! -> gain -> hard clamp. Parameter updates are staged via
//! [`DspNode::stage_params`] and applied atomically at the next block
//! boundary; envelope and filter state persist across blocks.

const LOWPASS_HZ: f64 = 200.0;
const HIGHPASS_HZ: f64 = 4000.0;

/// Pipeline parameters, atomically swapped in at a block boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioParams {
    pub bypass: bool,
    pub threshold_db: f64,
    pub ratio: f64,
    pub attack_s: f64,
    pub release_s: f64,
    pub eq_low_gain_db: f64,
    pub eq_mid_gain_db: f64,
    pub eq_high_gain_db: f64,
    pub gain_db: f64,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            bypass: false,
            threshold_db: -18.0,
            ratio: 2.0,
            attack_s: 0.01,
            release_s: 0.15,
            eq_low_gain_db: 0.0,
            eq_mid_gain_db: 0.0,
            eq_high_gain_db: 0.0,
            gain_db: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct ChannelState {
    envelope: f64,
    low: f64,
    high: f64,
    prev_input: f64,
}

/// A stateful per-channel DSP pipeline.
pub struct DspNode {
    sample_rate: f64,
    params: AudioParams,
    pending: Option<AudioParams>,
    channel_state: Vec<ChannelState>,
}

impl DspNode {
    pub fn new(sample_rate: f64, channels: usize, params: AudioParams) -> Self {
        Self {
            sample_rate,
            params,
            pending: None,
            channel_state: vec![ChannelState::default(); channels],
        }
    }

    /// Stage a parameter update; takes effect at the start of the next
    /// [`process_block`] call, never mid-block.
    pub fn stage_params(&mut self, params: AudioParams) {
        self.pending = Some(params);
    }

    /// Process one block of interleaved-by-channel PCM in place.
    pub fn process_block(&mut self, channels: &mut [Vec<f32>]) {
        if let Some(p) = self.pending.take() {
            self.params = p;
        }
        if self.params.bypass {
            return;
        }

        let sr = self.sample_rate;
        let alpha_attack = (-1.0 / (sr * self.params.attack_s.max(1e-6))).exp();
        let alpha_release = (-1.0 / (sr * self.params.release_s.max(1e-6))).exp();
        let alpha_lo = 1.0 - (-std::f64::consts::TAU * LOWPASS_HZ / sr).exp();
        let alpha_hi = (-std::f64::consts::TAU * HIGHPASS_HZ / sr).exp();
        let gain_lin = db_to_lin(self.params.gain_db);
        let low_gain = db_to_lin(self.params.eq_low_gain_db);
        let mid_gain = db_to_lin(self.params.eq_mid_gain_db);
        let high_gain = db_to_lin(self.params.eq_high_gain_db);

        for (ch_idx, block) in channels.iter_mut().enumerate() {
            if ch_idx >= self.channel_state.len() {
                self.channel_state.resize(ch_idx + 1, ChannelState::default());
            }
            let state = &mut self.channel_state[ch_idx];

            for sample in block.iter_mut() {
                let x = f64::from(*sample);

                // Compressor.
                let in_db = 20.0 * (x.abs().max(1e-4)).log10();
                let reduction = if in_db > self.params.threshold_db {
                    let over = in_db - self.params.threshold_db;
                    over * (1.0 - 1.0 / self.params.ratio)
                } else {
                    0.0
                };
                let alpha = if reduction > state.envelope { alpha_attack } else { alpha_release };
                state.envelope = alpha * state.envelope + (1.0 - alpha) * reduction;
                let compressed = x * 10f64.powf(-state.envelope / 20.0);

                // Three-band EQ.
                state.low += alpha_lo * (compressed - state.low);
                state.high = alpha_hi * (state.high + compressed - state.prev_input);
                state.prev_input = compressed;
                let mid = compressed - state.low - state.high;
                let eq_out = state.low * low_gain + mid * mid_gain + state.high * high_gain;

                // Gain + hard clamp.
                let out = (eq_out * gain_lin).clamp(-1.0, 1.0);
                *sample = out as f32;
            }
        }
    }
}

fn db_to_lin(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passthrough_at_default_params_is_near_identity() {
        let mut node = DspNode::new(48000.0, 1, AudioParams::default());
        let mut block = vec![vec![0.1f32; 64]];
        node.process_block(&mut block);
        for s in &block[0] {
            assert!(s.abs() < 1.0);
        }
    }

    #[test]
    fn bypass_leaves_samples_untouched() {
        let mut params = AudioParams::default();
        params.bypass = true;
        let mut node = DspNode::new(48000.0, 1, params);
        let mut block = vec![vec![0.37f32; 8]];
        node.process_block(&mut block);
        assert!(block[0].iter().all(|&s| s == 0.37));
    }

    #[test]
    fn hard_clamp_bounds_output() {
        let mut params = AudioParams::default();
        params.gain_db = 40.0;
        let mut node = DspNode::new(48000.0, 1, params);
        let mut block = vec![vec![0.9f32; 16]];
        node.process_block(&mut block);
        assert!(block[0].iter().all(|&s| s <= 1.0 && s >= -1.0));
    }

    #[test]
    fn staged_params_apply_only_at_next_block() {
        let mut node = DspNode::new(48000.0, 1, AudioParams::default());
        let mut staged = AudioParams::default();
        staged.gain_db = -100.0;
        node.stage_params(staged);
        let mut block1 = vec![vec![0.5f32; 4]];
        node.process_block(&mut block1);
        assert!(block1[0][0].abs() < 0.1); // already applied at this block's start
        let mut block2 = vec![vec![0.5f32; 4]];
        node.process_block(&mut block2);
        assert!(block2[0][0].abs() < 0.1);
    }
}
