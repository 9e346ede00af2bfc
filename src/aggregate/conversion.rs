//! Funnel conversion rates by tenure band

use crate::records::NormalizedRecord;
use serde::Serialize;

/// Coarse tenure band on `months_with_company`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TenureBand {
    /// 0-3 months
    New,
    /// 4-12 months
    Developing,
    /// 13-24 months
    Established,
    /// 25+ months
    Veteran,
}

impl TenureBand {
    pub const ALL: [TenureBand; 4] = [
        TenureBand::New,
        TenureBand::Developing,
        TenureBand::Established,
        TenureBand::Veteran,
    ];

    pub fn from_months(months: f64) -> Self {
        if months <= 3.0 {
            TenureBand::New
        } else if months <= 12.0 {
            TenureBand::Developing
        } else if months <= 24.0 {
            TenureBand::Established
        } else {
            TenureBand::Veteran
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TenureBand::New => "new",
            TenureBand::Developing => "developing",
            TenureBand::Established => "established",
            TenureBand::Veteran => "veteran",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Mean per-record conversion rates for one band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionRate {
    pub category: TenureBand,
    pub proposal_to_quotation: f64,
    pub quotation_to_policy: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct BandAccumulator {
    proposal_to_quotation: f64,
    quotation_to_policy: f64,
    count: usize,
}

/// Conversion rates for all four bands, in band order.
///
/// Per record, `proposal_to_quotation = quotations / proposals` (0 without
/// proposals) and `quotation_to_policy = policies / quotations` (0 without
/// quotations); each band reports the mean of those ratios. Empty bands
/// report 0.
pub fn conversion_rates(records: &[NormalizedRecord]) -> Vec<ConversionRate> {
    let mut bands = [BandAccumulator::default(); 4];

    for record in records {
        let proposals = record.proposals_or_zero();
        let quotations = record.quotations_or_zero();
        let policies = record.policies_or_zero();

        let acc = &mut bands[TenureBand::from_months(record.months_or_zero()).index()];
        acc.proposal_to_quotation += if proposals > 0.0 { quotations / proposals } else { 0.0 };
        acc.quotation_to_policy += if quotations > 0.0 { policies / quotations } else { 0.0 };
        acc.count += 1;
    }

    TenureBand::ALL
        .iter()
        .map(|&band| {
            let acc = bands[band.index()];
            let mean = |total: f64| if acc.count > 0 { total / acc.count as f64 } else { 0.0 };
            ConversionRate {
                category: band,
                proposal_to_quotation: mean(acc.proposal_to_quotation),
                quotation_to_policy: mean(acc.quotation_to_policy),
            }
        })
        .collect()
}
