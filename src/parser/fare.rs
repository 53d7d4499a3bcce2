use crate::error::Result;
use crate::index::NetexIndex;
use crate::model::{FareFrame, FareZone};

use super::{Diagnostics, FrameParser};

#[derive(Debug, Default)]
pub struct FareFrameParser {
    fare_zones: Vec<FareZone>,
}
impl FareFrameParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameParser<FareFrame> for FareFrameParser {
    fn parse(&mut self, frame: &FareFrame, diagnostics: &mut Diagnostics) -> Result<()> {
        self.fare_zones.extend_from_slice(&frame.fare_zones);
        diagnostics.record_other_elements("FareFrame", &frame.other_elements);
        Ok(())
    }
    fn commit(self, index: &NetexIndex) -> Result<()> {
        index.fare_zones.put_all(self.fare_zones);
        Ok(())
    }
}
