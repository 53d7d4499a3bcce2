use crate::error::Result;
use crate::index::NetexIndex;
use crate::model::{Block, BlockElement, VehicleScheduleFrame};

use super::{Diagnostics, FrameParser};

// compound and train blocks are not extracted
#[derive(Debug, Default)]
pub struct VehicleScheduleFrameParser {
    blocks: Vec<Block>,
}
impl VehicleScheduleFrameParser {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameParser<VehicleScheduleFrame> for VehicleScheduleFrameParser {
    fn parse(&mut self, frame: &VehicleScheduleFrame, diagnostics: &mut Diagnostics) -> Result<()> {
        for block in &frame.blocks {
            match block {
                BlockElement::Block(block) => self.blocks.push(block.clone()),
                BlockElement::Unrecognized => diagnostics.record_skipped("Block"),
            }
        }
        diagnostics.record_other_elements("VehicleScheduleFrame", &frame.other_elements);
        Ok(())
    }
    fn commit(self, index: &NetexIndex) -> Result<()> {
        index.blocks.put_all(self.blocks);
        Ok(())
    }
}
