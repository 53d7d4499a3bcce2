use crate::error::Result;
use crate::index::NetexIndex;
use crate::model::{
    Authority, Branding, Operator, Organisation, ResourceFrame, TypeOfProductCategory,
    TypeOfValue, ValueSet, ValueSetMember,
};

use super::{Diagnostics, FrameParser};

const TYPE_OF_PRODUCT_CATEGORY: &str = "TypeOfProductCategory";

#[derive(Debug, Default)]
pub struct ResourceFrameParser {
    authorities: Vec<Authority>,
    operators: Vec<Operator>,
    brandings: Vec<Branding>,
    type_of_product_categories: Vec<TypeOfProductCategory>,
}
impl ResourceFrameParser {
    pub fn new() -> Self {
        Self::default()
    }
    fn parse_organisations(&mut self, organisations: &[Organisation], diagnostics: &mut Diagnostics) {
        for organisation in organisations {
            match organisation {
                Organisation::Authority(authority) => self.authorities.push(authority.clone()),
                Organisation::Operator(operator) => self.operators.push(operator.clone()),
                Organisation::Unrecognized => diagnostics.record_skipped("Organisation"),
            }
        }
    }
    fn parse_types_of_value(&mut self, types_of_value: &[TypeOfValue], diagnostics: &mut Diagnostics) {
        for type_of_value in types_of_value {
            match type_of_value {
                TypeOfValue::Branding(branding) => self.brandings.push(branding.clone()),
                TypeOfValue::ValueSet(value_set) => self.parse_value_set(value_set, diagnostics),
                TypeOfValue::Unrecognized => diagnostics.record_skipped("TypeOfValue"),
            }
        }
    }
    // value sets are generic, only the class name tells what they hold
    fn parse_value_set(&mut self, value_set: &ValueSet, diagnostics: &mut Diagnostics) {
        let holds_product_categories = value_set
            .name_of_class
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(TYPE_OF_PRODUCT_CATEGORY));
        if !holds_product_categories {
            diagnostics.record_skipped(format!("ValueSet '{}'", value_set.id));
            return;
        }
        for value in &value_set.values {
            match value {
                ValueSetMember::TypeOfProductCategory(category) => {
                    self.type_of_product_categories.push(category.clone())
                }
                ValueSetMember::Unrecognized => diagnostics.record_skipped("TypeOfValue"),
            }
        }
    }
}

impl FrameParser<ResourceFrame> for ResourceFrameParser {
    fn parse(&mut self, frame: &ResourceFrame, diagnostics: &mut Diagnostics) -> Result<()> {
        self.parse_organisations(&frame.organisations, diagnostics);
        self.parse_types_of_value(&frame.types_of_value, diagnostics);
        diagnostics.record_other_elements("ResourceFrame", &frame.other_elements);
        Ok(())
    }
    fn commit(self, index: &NetexIndex) -> Result<()> {
        index.authorities.put_all(self.authorities);
        index.operators.put_all(self.operators);
        index.brandings.put_all(self.brandings);
        index
            .type_of_product_categories
            .put_all(self.type_of_product_categories);
        Ok(())
    }
}
