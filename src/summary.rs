use crate::models::{
    AddressOption, Dataset, DeliveryMethod, DeliveryOutcome, HomeSummary, Patient,
    PatientStatus, SummaryFilter,
};
use chrono::{Local, NaiveDate};
use std::collections::BTreeSet;

/// Address value meaning "no filter".
pub const ALL_ADDRESSES: &str = "all";

pub fn build_summary(data: &Dataset, address: Option<&str>) -> HomeSummary {
    build_summary_at(Local::now().date_naive(), data, address)
}

pub fn build_summary_at(today: NaiveDate, data: &Dataset, address: Option<&str>) -> HomeSummary {
    let address = address
        .map(str::trim)
        .filter(|value| !value.is_empty() && *value != ALL_ADDRESSES);
    let patients: Vec<&Patient> = data
        .patients
        .iter()
        .filter(|patient| address.is_none_or(|value| patient.address.trim() == value))
        .collect();

    let mut summary = HomeSummary {
        success: true,
        total_patients: patients.len() as u64,
        ..HomeSummary::default()
    };

    for patient in &patients {
        match patient.status {
            PatientStatus::Active => summary.active_pregnancies += 1,
            PatientStatus::Historical => summary.historical_patients += 1,
        }

        summary.todays_appointments += patient
            .appointments
            .iter()
            .filter(|date| **date == today)
            .count() as u64;

        let Some(delivery) = &patient.delivery else {
            continue;
        };
        summary.total_deliveries += 1;
        summary.total_babies = summary.total_babies.saturating_add(u64::from(delivery.babies));
        match delivery.method {
            DeliveryMethod::Normal => summary.normal_delivery_count += 1,
            DeliveryMethod::CSection => summary.c_section_delivery_count += 1,
        }
        match delivery.outcome {
            DeliveryOutcome::Matured => summary.delivery_types.matured_count += 1,
            DeliveryOutcome::Premature => summary.delivery_types.premature_count += 1,
            DeliveryOutcome::Mortality => summary.delivery_types.mortality_count += 1,
        }
    }

    let total = summary.total_deliveries;
    summary.normal_delivery_rate = percent(summary.normal_delivery_count, total);
    summary.c_section_rate = percent(summary.c_section_delivery_count, total);
    let types = &mut summary.delivery_types;
    types.matured = percent(types.matured_count, total);
    types.premature = percent(types.premature_count, total);
    types.mortality = percent(types.mortality_count, total);

    summary.filter = address.map(|value| SummaryFilter {
        address: value.to_string(),
        patient_count: summary.total_patients,
    });

    summary
}

pub fn address_options(data: &Dataset) -> Vec<AddressOption> {
    let addresses: BTreeSet<&str> = data
        .patients
        .iter()
        .map(|patient| patient.address.trim())
        .filter(|address| !address.is_empty())
        .collect();

    let mut options = Vec::with_capacity(addresses.len() + 1);
    options.push(AddressOption {
        value: ALL_ADDRESSES.to_string(),
        label: "All Locations".to_string(),
    });
    options.extend(addresses.into_iter().map(|address| AddressOption {
        value: address.to_string(),
        label: address.to_string(),
    }));
    options
}

fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 * 1000.0 / total as f64).round() / 10.0
}
