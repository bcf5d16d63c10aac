// DCT-II / DCT-III pair computed through a 2N-point complex FFT on the
// symmetric extension of the block.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f64::consts::PI;
use std::sync::Arc;

use super::transform::BlockTransform;

/// FFT-based DCT for a fixed block length
///
/// Forward (DCT-II):  X[k] = 2 Σ x[n] cos(πk(2n+1) / 2N)
///
/// Inverse (DCT-III): y[n] = X[0] + 2 Σ(k=1..N-1) X[k] cos(πk(2n+1) / 2N)
///
/// Applying both yields `2N * x`.
pub struct Dct {
    /// Block length (N)
    n: usize,
    /// Forward FFT of size 2N
    fft: Arc<dyn Fft<f64>>,
    /// Inverse FFT of size 2N
    ifft: Arc<dyn Fft<f64>>,
    /// Twiddle factors: e^(-iπk / 2N) for k in 0..N
    twiddle: Vec<Complex<f64>>,
    /// Symmetric extension / spectrum work area (2N)
    buffer: Vec<Complex<f64>>,
    /// FFT scratch, sized for both plans
    scratch: Vec<Complex<f64>>,
}

impl Dct {
    /// Plan a DCT for blocks of `block_size` samples
    pub fn new(block_size: usize) -> Self {
        assert!(block_size > 0, "DCT block size must be positive");

        let n = block_size;
        let n2 = 2 * n;

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n2);
        let ifft = planner.plan_fft_inverse(n2);

        let twiddle: Vec<Complex<f64>> = (0..n)
            .map(|k| {
                let theta = PI * k as f64 / n2 as f64;
                Complex::new(theta.cos(), -theta.sin())
            })
            .collect();

        let scratch_len = fft
            .get_inplace_scratch_len()
            .max(ifft.get_inplace_scratch_len());

        Self {
            n,
            fft,
            ifft,
            twiddle,
            buffer: vec![Complex::new(0.0, 0.0); n2],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        }
    }
}

impl BlockTransform for Dct {
    fn block_size(&self) -> usize {
        self.n
    }

    fn forward(&mut self, block: &mut [f64]) {
        let n = self.n;
        assert_eq!(block.len(), n, "Block length does not match DCT size");

        // Mirror: y = [x0 .. x(N-1), x(N-1) .. x0]
        for (i, &x) in block.iter().enumerate() {
            self.buffer[i] = Complex::new(x, 0.0);
            self.buffer[2 * n - 1 - i] = Complex::new(x, 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        // Y[k] = e^(iπk/2N) X[k], so undo the half-sample shift
        for (k, out) in block.iter_mut().enumerate() {
            *out = (self.twiddle[k] * self.buffer[k]).re;
        }
    }

    fn inverse(&mut self, block: &mut [f64]) {
        let n = self.n;
        assert_eq!(block.len(), n, "Block length does not match DCT size");

        // Rebuild the Hermitian spectrum of the symmetric extension
        for (k, &c) in block.iter().enumerate() {
            self.buffer[k] = self.twiddle[k].conj() * c;
        }
        self.buffer[n] = Complex::new(0.0, 0.0);
        for k in 1..n {
            self.buffer[2 * n - k] = self.buffer[k].conj();
        }

        self.ifft
            .process_with_scratch(&mut self.buffer, &mut self.scratch);

        for (i, out) in block.iter_mut().enumerate() {
            *out = self.buffer[i].re;
        }
    }
}
