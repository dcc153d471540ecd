//! `MaxResults` / `NextToken` decoding.

use ruststack_ec2_model::error::Ec2Error;
use ruststack_ec2_model::types::PageRequest;

use crate::params::QueryParams;

/// Inclusive `MaxResults` range accepted by one action.
///
/// The range is action-specific; EC2 uses e.g. `5..=1000` for
/// `DescribeSubnets` and `1..=100` for others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxResultsBounds {
    /// Smallest accepted value.
    pub min: i64,
    /// Largest accepted value.
    pub max: i64,
}

impl MaxResultsBounds {
    /// Create a bounds pair.
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Check a value against the range.
    pub fn check(&self, value: i64) -> Result<(), Ec2Error> {
        if (self.min..=self.max).contains(&value) {
            Ok(())
        } else {
            Err(Ec2Error::invalid_parameter_value(format!(
                "Value ( {value} ) for parameter MaxResults is invalid. \
                 Expecting a value between {} and {}.",
                self.min, self.max
            )))
        }
    }
}

impl QueryParams {
    /// Decode `MaxResults` and `NextToken`.
    ///
    /// When `bounds` is given, an out-of-range `MaxResults` is rejected with
    /// `InvalidParameterValue` instead of being clamped. Without bounds any
    /// value below 1 is rejected.
    pub fn page_request(&self, bounds: Option<MaxResultsBounds>) -> Result<PageRequest, Ec2Error> {
        let max_results = match self.get_int("MaxResults")? {
            Some(value) => {
                if let Some(bounds) = bounds {
                    bounds.check(value)?;
                }
                let value = usize::try_from(value)
                    .ok()
                    .filter(|value| *value >= 1)
                    .ok_or_else(|| {
                        Ec2Error::invalid_parameter_value(format!(
                            "Value ( {value} ) for parameter MaxResults is invalid. \
                             Expecting a positive value."
                        ))
                    })?;
                Some(value)
            }
            None => None,
        };

        Ok(PageRequest {
            max_results,
            next_token: self.get_scalar("NextToken").map(ToOwned::to_owned),
        })
    }
}
