/// In-place block transform used by the encoder and decoder
///
/// Implementations are planned for one block length and must not allocate
/// per call. The codec assumes `inverse(forward(x)) == 2N * x`, the
/// unnormalized DCT-II / DCT-III convention; the encoder's `1 / 2N` scale
/// cancels that factor.
pub trait BlockTransform {
    /// block length N this transform was planned for
    fn block_size(&self) -> usize;

    /// analysis: time samples -> coefficients
    fn forward(&mut self, block: &mut [f64]);

    /// synthesis: coefficients -> time samples
    fn inverse(&mut self, block: &mut [f64]);
}

impl<T: BlockTransform + ?Sized> BlockTransform for Box<T> {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn forward(&mut self, block: &mut [f64]) {
        (**self).forward(block)
    }

    fn inverse(&mut self, block: &mut [f64]) {
        (**self).inverse(block)
    }
}
