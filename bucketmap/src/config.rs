use crate::error::Result;

/// Growth behaviour of [`OpenAddressingTable`](crate::OpenAddressingTable)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeConfig {
    /// Load factor a new key may not reach (default: 0.5)
    pub max_load_factor: f64,

    /// Capacity multiplier applied on auto-grow (default: 2)
    pub growth_factor: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            max_load_factor: 0.5,
            growth_factor: 2,
        }
    }
}

impl ProbeConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.max_load_factor > 0.0 && self.max_load_factor < 1.0) {
            return Err(format!(
                "max_load_factor must be in (0, 1), got {}",
                self.max_load_factor
            )
            .into());
        }
        if self.growth_factor < 2 {
            return Err(format!(
                "growth_factor must be at least 2, got {}",
                self.growth_factor
            )
            .into());
        }
        Ok(())
    }
}
