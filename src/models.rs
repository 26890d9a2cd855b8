use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Gestational age in whole weeks. Not range-checked.
pub type Week = i32;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ObservedPoint {
    #[serde(rename = "GESTATIONAL_AGE_WEEKS")]
    pub week: Week,
    #[serde(rename = "MATERNAL_WEIGHT", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "FUNDAL_HEIGHT", skip_serializing_if = "Option::is_none")]
    pub fundal_height: Option<f64>,
    #[serde(rename = "HEMOGLOBIN_LEVEL", skip_serializing_if = "Option::is_none")]
    pub hemoglobin: Option<f64>,
    #[serde(rename = "BP_SYSTOLIC", skip_serializing_if = "Option::is_none")]
    pub bp_systolic: Option<f64>,
    #[serde(rename = "BP_DIASTOLIC", skip_serializing_if = "Option::is_none")]
    pub bp_diastolic: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AveragePoint {
    #[serde(rename = "GESTATIONAL_AGE_WEEKS")]
    pub week: Week,
    #[serde(rename = "AVG_WEIGHT", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "AVG_FUNDAL", skip_serializing_if = "Option::is_none")]
    pub fundal_height: Option<f64>,
    #[serde(rename = "AVG_HB", skip_serializing_if = "Option::is_none")]
    pub hemoglobin: Option<f64>,
    #[serde(rename = "AVG_SYSTOLIC", skip_serializing_if = "Option::is_none")]
    pub bp_systolic: Option<f64>,
    #[serde(rename = "AVG_DIASTOLIC", skip_serializing_if = "Option::is_none")]
    pub bp_diastolic: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictedPoint {
    #[serde(rename = "GESTATIONAL_AGE_WEEKS")]
    pub week: Week,
    #[serde(rename = "PREDICTED_WEIGHT", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(rename = "PREDICTED_FUNDAL_HEIGHT", skip_serializing_if = "Option::is_none")]
    pub fundal_height: Option<f64>,
    #[serde(rename = "PREDICTED_HEMOGLOBIN_LEVEL", skip_serializing_if = "Option::is_none")]
    pub hemoglobin: Option<f64>,
    #[serde(rename = "PREDICTED_BP_SYSTOLIC", skip_serializing_if = "Option::is_none")]
    pub bp_systolic: Option<f64>,
    #[serde(rename = "PREDICTED_BP_DIASTOLIC", skip_serializing_if = "Option::is_none")]
    pub bp_diastolic: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "series", rename_all = "snake_case")]
pub enum MeasurementPoint {
    Observed(ObservedPoint),
    Average(AveragePoint),
    Predicted(PredictedPoint),
}

impl MeasurementPoint {
    pub fn week(&self) -> Week {
        match self {
            Self::Observed(point) => point.week,
            Self::Average(point) => point.week,
            Self::Predicted(point) => point.week,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "MATERNAL_WEIGHT")]
    Weight,
    #[serde(rename = "FUNDAL_HEIGHT")]
    FundalHeight,
    #[serde(rename = "HEMOGLOBIN_LEVEL")]
    Hemoglobin,
    #[serde(rename = "BP_SYSTOLIC")]
    BpSystolic,
    #[serde(rename = "BP_DIASTOLIC")]
    BpDiastolic,
    #[serde(rename = "AVG_WEIGHT")]
    AvgWeight,
    #[serde(rename = "AVG_FUNDAL")]
    AvgFundal,
    #[serde(rename = "AVG_HB")]
    AvgHemoglobin,
    #[serde(rename = "AVG_SYSTOLIC")]
    AvgSystolic,
    #[serde(rename = "AVG_DIASTOLIC")]
    AvgDiastolic,
    #[serde(rename = "PREDICTED_WEIGHT")]
    PredictedWeight,
    #[serde(rename = "PREDICTED_FUNDAL_HEIGHT")]
    PredictedFundalHeight,
    #[serde(rename = "PREDICTED_HEMOGLOBIN_LEVEL")]
    PredictedHemoglobin,
    #[serde(rename = "PREDICTED_BP_SYSTOLIC")]
    PredictedBpSystolic,
    #[serde(rename = "PREDICTED_BP_DIASTOLIC")]
    PredictedBpDiastolic,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlignedRow {
    #[serde(rename = "GESTATIONAL_AGE_WEEKS")]
    pub week: Week,
    #[serde(rename = "MATERNAL_WEIGHT")]
    pub weight: Option<f64>,
    #[serde(rename = "FUNDAL_HEIGHT")]
    pub fundal_height: Option<f64>,
    #[serde(rename = "HEMOGLOBIN_LEVEL")]
    pub hemoglobin: Option<f64>,
    #[serde(rename = "BP_SYSTOLIC")]
    pub bp_systolic: Option<f64>,
    #[serde(rename = "BP_DIASTOLIC")]
    pub bp_diastolic: Option<f64>,
    #[serde(rename = "AVG_WEIGHT")]
    pub avg_weight: Option<f64>,
    #[serde(rename = "AVG_FUNDAL")]
    pub avg_fundal: Option<f64>,
    #[serde(rename = "AVG_HB")]
    pub avg_hemoglobin: Option<f64>,
    #[serde(rename = "AVG_SYSTOLIC")]
    pub avg_systolic: Option<f64>,
    #[serde(rename = "AVG_DIASTOLIC")]
    pub avg_diastolic: Option<f64>,
    #[serde(rename = "PREDICTED_WEIGHT")]
    pub predicted_weight: Option<f64>,
    #[serde(rename = "PREDICTED_FUNDAL_HEIGHT")]
    pub predicted_fundal_height: Option<f64>,
    #[serde(rename = "PREDICTED_HEMOGLOBIN_LEVEL")]
    pub predicted_hemoglobin: Option<f64>,
    #[serde(rename = "PREDICTED_BP_SYSTOLIC")]
    pub predicted_bp_systolic: Option<f64>,
    #[serde(rename = "PREDICTED_BP_DIASTOLIC")]
    pub predicted_bp_diastolic: Option<f64>,
}

impl AlignedRow {
    pub fn empty(week: Week) -> Self {
        Self {
            week,
            ..Self::default()
        }
    }

    pub fn value(&self, field: Field) -> Option<f64> {
        match field {
            Field::Weight => self.weight,
            Field::FundalHeight => self.fundal_height,
            Field::Hemoglobin => self.hemoglobin,
            Field::BpSystolic => self.bp_systolic,
            Field::BpDiastolic => self.bp_diastolic,
            Field::AvgWeight => self.avg_weight,
            Field::AvgFundal => self.avg_fundal,
            Field::AvgHemoglobin => self.avg_hemoglobin,
            Field::AvgSystolic => self.avg_systolic,
            Field::AvgDiastolic => self.avg_diastolic,
            Field::PredictedWeight => self.predicted_weight,
            Field::PredictedFundalHeight => self.predicted_fundal_height,
            Field::PredictedHemoglobin => self.predicted_hemoglobin,
            Field::PredictedBpSystolic => self.predicted_bp_systolic,
            Field::PredictedBpDiastolic => self.predicted_bp_diastolic,
        }
    }

    pub(crate) fn set_observed(&mut self, point: &ObservedPoint) {
        self.weight = point.weight;
        self.fundal_height = point.fundal_height;
        self.hemoglobin = point.hemoglobin;
        self.bp_systolic = point.bp_systolic;
        self.bp_diastolic = point.bp_diastolic;
    }

    pub(crate) fn set_average(&mut self, point: &AveragePoint) {
        self.avg_weight = point.weight;
        self.avg_fundal = point.fundal_height;
        self.avg_hemoglobin = point.hemoglobin;
        self.avg_systolic = point.bp_systolic;
        self.avg_diastolic = point.bp_diastolic;
    }

    pub(crate) fn set_predicted(&mut self, point: &PredictedPoint) {
        self.predicted_weight = point.weight;
        self.predicted_fundal_height = point.fundal_height;
        self.predicted_hemoglobin = point.hemoglobin;
        self.predicted_bp_systolic = point.bp_systolic;
        self.predicted_bp_diastolic = point.bp_diastolic;
    }

    /// Starts every predicted slot from the observed value of the same metric, where one exists.
    pub(crate) fn continue_from_observed(&mut self) {
        self.predicted_weight = self.weight.or(self.predicted_weight);
        self.predicted_fundal_height = self.fundal_height.or(self.predicted_fundal_height);
        self.predicted_hemoglobin = self.hemoglobin.or(self.predicted_hemoglobin);
        self.predicted_bp_systolic = self.bp_systolic.or(self.predicted_bp_systolic);
        self.predicted_bp_diastolic = self.bp_diastolic.or(self.predicted_bp_diastolic);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Weight,
    FundalHeight,
    Hemoglobin,
    BloodPressure,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Weight,
        Metric::FundalHeight,
        Metric::Hemoglobin,
        Metric::BloodPressure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::FundalHeight => "fundal_height",
            Self::Hemoglobin => "hemoglobin",
            Self::BloodPressure => "blood_pressure",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Weight => "kg",
            Self::FundalHeight => "cm",
            Self::Hemoglobin => "g/dL",
            Self::BloodPressure => "mmHg",
        }
    }

    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Weight => &[Field::Weight, Field::PredictedWeight, Field::AvgWeight],
            Self::FundalHeight => &[
                Field::FundalHeight,
                Field::PredictedFundalHeight,
                Field::AvgFundal,
            ],
            Self::Hemoglobin => &[
                Field::Hemoglobin,
                Field::PredictedHemoglobin,
                Field::AvgHemoglobin,
            ],
            Self::BloodPressure => &[
                Field::BpSystolic,
                Field::BpDiastolic,
                Field::PredictedBpSystolic,
                Field::PredictedBpDiastolic,
                Field::AvgSystolic,
                Field::AvgDiastolic,
            ],
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.as_str() == value)
            .ok_or_else(|| format!("unknown metric '{value}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    pub metric: Metric,
    pub unit: String,
    pub fields: Vec<Field>,
    pub rows: Vec<AlignedRow>,
    pub range: DisplayRange,
}

#[derive(Debug, Deserialize)]
pub struct AlignRequest {
    pub metric: Metric,
    #[serde(default)]
    pub observed: Vec<ObservedPoint>,
    #[serde(default)]
    pub average: Vec<AveragePoint>,
    #[serde(default)]
    pub predicted: Vec<PredictedPoint>,
    // Tagged points, appended after the per-series lists.
    #[serde(default)]
    pub points: Vec<MeasurementPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    Active,
    Historical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    Normal,
    CSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Matured,
    Premature,
    Mortality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub method: DeliveryMethod,
    pub outcome: DeliveryOutcome,
    #[serde(default = "default_babies")]
    pub babies: u32,
}

fn default_babies() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub address: String,
    pub status: PatientStatus,
    #[serde(default)]
    pub appointments: Vec<NaiveDate>,
    #[serde(default)]
    pub observations: Vec<ObservedPoint>,
    #[serde(default)]
    pub predictions: Vec<PredictedPoint>,
    #[serde(default)]
    pub delivery: Option<Delivery>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub averages: Vec<AveragePoint>,
}

impl Dataset {
    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|patient| patient.id == id)
    }
}

#[derive(Debug, Serialize)]
pub struct PatientListItem {
    pub id: String,
    pub name: String,
    pub address: String,
    pub status: PatientStatus,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTypes {
    pub matured: f64,
    pub premature: f64,
    pub mortality: f64,
    pub matured_count: u64,
    pub premature_count: u64,
    pub mortality_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryFilter {
    pub address: String,
    pub patient_count: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSummary {
    pub success: bool,
    pub total_patients: u64,
    pub active_pregnancies: u64,
    pub historical_patients: u64,
    pub normal_delivery_count: u64,
    pub c_section_delivery_count: u64,
    pub total_deliveries: u64,
    pub total_babies: u64,
    pub todays_appointments: u64,
    pub normal_delivery_rate: f64,
    pub c_section_rate: f64,
    pub delivery_types: DeliveryTypes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SummaryFilter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddressesResponse {
    pub success: bool,
    pub addresses: Vec<AddressOption>,
}
