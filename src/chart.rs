use crate::models::{
    AlignedRow, AveragePoint, ChartView, DisplayRange, Field, MeasurementPoint, Metric,
    ObservedPoint, PredictedPoint, Week,
};
use std::{collections::BTreeMap, fmt, str::FromStr};

pub const DEFAULT_RANGE: DisplayRange = DisplayRange {
    min: 0.0,
    max: 100.0,
};

pub const FRAME_FIRST_WEEK: Week = 2;
pub const FRAME_LAST_WEEK: Week = 40;
// The frame may stretch to cover late data, but never past this week.
pub const FRAME_MAX_WEEK: Week = 42;

const RANGE_PADDING: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlignPolicy {
    #[default]
    Sparse,
    /// Every week from [`FRAME_FIRST_WEEK`] through the largest week seen, clamped to
    /// `FRAME_LAST_WEEK..=FRAME_MAX_WEEK`. Data weeks outside the frame keep their rows.
    WeekFrame,
}

impl fmt::Display for AlignPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sparse => f.write_str("sparse"),
            Self::WeekFrame => f.write_str("frame"),
        }
    }
}

impl FromStr for AlignPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sparse" => Ok(Self::Sparse),
            "frame" | "week_frame" => Ok(Self::WeekFrame),
            other => Err(format!("unknown week policy '{other}'")),
        }
    }
}

pub fn align(
    observed: &[ObservedPoint],
    average: &[AveragePoint],
    predicted: &[PredictedPoint],
) -> Vec<AlignedRow> {
    align_with(AlignPolicy::Sparse, observed, average, predicted)
}

/// Observed points seed the rows, then average and predicted points fill only their own
/// slots. An empty observed series yields no rows. At the week of the last observed
/// point the predicted slots take the observed values.
pub fn align_with(
    policy: AlignPolicy,
    observed: &[ObservedPoint],
    average: &[AveragePoint],
    predicted: &[PredictedPoint],
) -> Vec<AlignedRow> {
    let Some(last_observed) = observed.last() else {
        return Vec::new();
    };

    let mut rows: BTreeMap<Week, AlignedRow> = BTreeMap::new();
    for point in observed {
        row_for(&mut rows, point.week).set_observed(point);
    }
    for point in average {
        row_for(&mut rows, point.week).set_average(point);
    }
    for point in predicted {
        row_for(&mut rows, point.week).set_predicted(point);
    }

    if policy == AlignPolicy::WeekFrame {
        let last_week = rows
            .keys()
            .next_back()
            .copied()
            .map_or(FRAME_LAST_WEEK, |week| week.clamp(FRAME_LAST_WEEK, FRAME_MAX_WEEK));
        for week in FRAME_FIRST_WEEK..=last_week {
            row_for(&mut rows, week);
        }
    }

    if let Some(row) = rows.get_mut(&last_observed.week) {
        row.continue_from_observed();
    }

    rows.into_values().collect()
}

pub type SplitSeries = (Vec<ObservedPoint>, Vec<AveragePoint>, Vec<PredictedPoint>);

/// Sorts a mixed list of tagged points into the three series, keeping caller order.
pub fn split_points(points: &[MeasurementPoint]) -> SplitSeries {
    let mut observed = Vec::new();
    let mut average = Vec::new();
    let mut predicted = Vec::new();
    for point in points {
        match point {
            MeasurementPoint::Observed(point) => observed.push(*point),
            MeasurementPoint::Average(point) => average.push(*point),
            MeasurementPoint::Predicted(point) => predicted.push(*point),
        }
    }
    (observed, average, predicted)
}

fn row_for(rows: &mut BTreeMap<Week, AlignedRow>, week: Week) -> &mut AlignedRow {
    rows.entry(week).or_insert_with(|| AlignedRow::empty(week))
}

pub fn display_range(rows: &[AlignedRow], fields: &[Field]) -> DisplayRange {
    let mut bounds: Option<(f64, f64)> = None;
    let values = rows
        .iter()
        .flat_map(|row| fields.iter().filter_map(move |field| row.value(*field)))
        .filter(|value| value.is_finite());
    for value in values {
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }

    let Some((min, max)) = bounds else {
        return DEFAULT_RANGE;
    };
    let pad = (max - min) * RANGE_PADDING;
    DisplayRange {
        min: (min - pad).floor().max(0.0),
        max: (max + pad).ceil(),
    }
}

pub fn chart_view(
    metric: Metric,
    policy: AlignPolicy,
    observed: &[ObservedPoint],
    average: &[AveragePoint],
    predicted: &[PredictedPoint],
) -> ChartView {
    let rows = align_with(policy, observed, average, predicted);
    let fields = metric.fields();
    let range = display_range(&rows, fields);
    ChartView {
        metric,
        unit: metric.unit().to_string(),
        fields: fields.to_vec(),
        rows,
        range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observed_weight(week: Week, weight: f64) -> ObservedPoint {
        ObservedPoint {
            week,
            weight: Some(weight),
            ..ObservedPoint::default()
        }
    }

    fn predicted_weight(week: Week, weight: f64) -> PredictedPoint {
        PredictedPoint {
            week,
            weight: Some(weight),
            ..PredictedPoint::default()
        }
    }

    fn average_weight(week: Week, weight: f64) -> AveragePoint {
        AveragePoint {
            week,
            weight: Some(weight),
            ..AveragePoint::default()
        }
    }

    fn weeks(rows: &[AlignedRow]) -> Vec<Week> {
        rows.iter().map(|row| row.week).collect()
    }

    #[test]
    fn align_empty_inputs_yield_no_rows() {
        assert!(align(&[], &[], &[]).is_empty());
    }

    #[test]
    fn align_without_observed_yields_no_rows() {
        let rows = align(&[], &[average_weight(10, 62.0)], &[predicted_weight(12, 58.0)]);
        assert!(rows.is_empty());
    }

    #[test]
    fn align_sorts_and_deduplicates_weeks() {
        let observed = [observed_weight(20, 70.0), observed_weight(8, 61.0), observed_weight(14, 65.0)];
        let average = [average_weight(14, 64.0), average_weight(30, 72.0)];
        let predicted = [predicted_weight(24, 72.0), predicted_weight(20, 71.0)];

        let rows = align(&observed, &average, &predicted);
        assert_eq!(weeks(&rows), vec![8, 14, 20, 24, 30]);
    }

    #[test]
    fn align_keeps_each_series_in_its_own_slots() {
        let observed = [observed_weight(10, 60.0), observed_weight(16, 64.0)];
        let average = [average_weight(10, 59.0)];
        let predicted = [predicted_weight(10, 57.0), predicted_weight(20, 68.0)];

        let rows = align(&observed, &average, &predicted);
        let week_10 = rows[0];
        assert_eq!(week_10.week, 10);
        assert_eq!(week_10.weight, Some(60.0));
        assert_eq!(week_10.avg_weight, Some(59.0));
        // not the boundary week, so the prediction is kept as given
        assert_eq!(week_10.predicted_weight, Some(57.0));

        let week_20 = rows[2];
        assert_eq!(week_20.week, 20);
        assert_eq!(week_20.weight, None);
        assert_eq!(week_20.avg_weight, None);
        assert_eq!(week_20.predicted_weight, Some(68.0));
    }

    #[test]
    fn align_prediction_starts_from_last_observation() {
        let observed = [observed_weight(10, 60.0)];
        let predicted = [predicted_weight(10, 55.0), predicted_weight(12, 58.0)];

        let rows = align(&observed, &[], &predicted);
        assert_eq!(weeks(&rows), vec![10, 12]);
        assert_eq!(rows[0].predicted_weight, Some(60.0));
        assert_eq!(rows[1].predicted_weight, Some(58.0));
    }

    #[test]
    fn align_boundary_keeps_prediction_when_observation_missing() {
        let observed = [ObservedPoint {
            week: 18,
            hemoglobin: Some(11.2),
            ..ObservedPoint::default()
        }];
        let predicted = [PredictedPoint {
            week: 18,
            weight: Some(66.0),
            hemoglobin: Some(10.0),
            ..PredictedPoint::default()
        }];

        let rows = align(&observed, &[], &predicted);
        assert_eq!(rows[0].predicted_hemoglobin, Some(11.2));
        assert_eq!(rows[0].predicted_weight, Some(66.0));
    }

    #[test]
    fn align_boundary_uses_caller_order_not_largest_week() {
        let observed = [observed_weight(12, 62.0), observed_weight(9, 59.0)];
        let predicted = [predicted_weight(9, 50.0), predicted_weight(12, 51.0)];

        let rows = align(&observed, &[], &predicted);
        assert_eq!(rows[0].predicted_weight, Some(59.0));
        assert_eq!(rows[1].predicted_weight, Some(51.0));
    }

    #[test]
    fn align_passes_out_of_domain_weeks_through() {
        let rows = align(&[observed_weight(-3, 50.0), observed_weight(45, 80.0)], &[], &[]);
        assert_eq!(weeks(&rows), vec![-3, 45]);
    }

    #[test]
    fn align_is_idempotent() {
        let observed = [observed_weight(12, 62.0), observed_weight(16, 64.5)];
        let average = [average_weight(12, 61.0), average_weight(16, 63.0)];
        let predicted = [predicted_weight(16, 64.0), predicted_weight(20, 67.0)];

        let first = align(&observed, &average, &predicted);
        let second = align(&observed, &average, &predicted);
        assert_eq!(first, second);
    }

    #[test]
    fn week_frame_fills_gaps_through_week_forty() {
        let rows = align_with(
            AlignPolicy::WeekFrame,
            &[observed_weight(10, 60.0)],
            &[],
            &[predicted_weight(12, 61.0)],
        );
        assert_eq!(rows.len(), 39);
        assert_eq!(rows.first().map(|row| row.week), Some(FRAME_FIRST_WEEK));
        assert_eq!(rows.last().map(|row| row.week), Some(FRAME_LAST_WEEK));
        assert_eq!(rows[8].weight, Some(60.0));
        assert_eq!(rows[3], AlignedRow::empty(5));
    }

    #[test]
    fn week_frame_extends_past_forty() {
        let rows = align_with(
            AlignPolicy::WeekFrame,
            &[observed_weight(30, 70.0)],
            &[],
            &[predicted_weight(42, 75.0)],
        );
        assert_eq!(rows.last().map(|row| row.week), Some(42));
    }

    #[test]
    fn week_frame_is_capped_for_far_weeks() {
        let rows = align_with(
            AlignPolicy::WeekFrame,
            &[observed_weight(10, 60.0)],
            &[],
            &[predicted_weight(3_000_000, 90.0)],
        );
        assert_eq!(rows.len(), 42);
        assert_eq!(rows[40].week, FRAME_MAX_WEEK);
        assert_eq!(rows[41].week, 3_000_000);
        assert_eq!(rows[41].predicted_weight, Some(90.0));

        let rows = align_with(AlignPolicy::WeekFrame, &[observed_weight(i32::MAX, 1.0)], &[], &[]);
        assert_eq!(rows.len(), 42);
        assert_eq!(rows[41].weight, Some(1.0));
    }

    #[test]
    fn split_points_keeps_order_within_kind() {
        let points = [
            MeasurementPoint::Predicted(predicted_weight(12, 58.0)),
            MeasurementPoint::Observed(observed_weight(14, 63.0)),
            MeasurementPoint::Average(average_weight(10, 59.0)),
            MeasurementPoint::Observed(observed_weight(10, 60.0)),
        ];
        let (observed, average, predicted) = split_points(&points);
        assert_eq!(points[0].week(), 12);
        assert_eq!(observed, vec![observed_weight(14, 63.0), observed_weight(10, 60.0)]);
        assert_eq!(average, vec![average_weight(10, 59.0)]);
        assert_eq!(predicted, vec![predicted_weight(12, 58.0)]);

        let rows = align(&observed, &average, &predicted);
        // week 10 is the last observed point in caller order
        assert_eq!(rows[0].predicted_weight, Some(60.0));
    }

    #[test]
    fn display_range_defaults_without_values() {
        assert_eq!(display_range(&[], Metric::Weight.fields()), DEFAULT_RANGE);

        let rows = align(&[ObservedPoint { week: 10, ..ObservedPoint::default() }], &[], &[]);
        assert_eq!(display_range(&rows, Metric::Weight.fields()), DEFAULT_RANGE);
    }

    #[test]
    fn display_range_pads_and_rounds() {
        let rows = align(
            &[observed_weight(10, 10.0), observed_weight(11, 20.0)],
            &[average_weight(12, 30.0)],
            &[],
        );
        let range = display_range(&rows, Metric::Weight.fields());
        assert_eq!(range, DisplayRange { min: 8.0, max: 32.0 });
    }

    #[test]
    fn display_range_never_negative() {
        let rows = align(&[observed_weight(10, 1.0), observed_weight(11, 2.0)], &[], &[]);
        let range = display_range(&rows, &[Field::Weight]);
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 3.0);
    }

    #[test]
    fn display_range_ignores_unselected_fields() {
        let observed = [ObservedPoint {
            week: 20,
            weight: Some(70.0),
            hemoglobin: Some(11.0),
            ..ObservedPoint::default()
        }];
        let rows = align(&observed, &[], &[]);
        let range = display_range(&rows, Metric::Hemoglobin.fields());
        assert_eq!(range, DisplayRange { min: 11.0, max: 11.0 });
    }

    #[test]
    fn chart_view_uses_metric_fields_and_unit() {
        let observed = [ObservedPoint {
            week: 20,
            bp_systolic: Some(120.0),
            bp_diastolic: Some(80.0),
            ..ObservedPoint::default()
        }];
        let view = chart_view(Metric::BloodPressure, AlignPolicy::Sparse, &observed, &[], &[]);
        assert_eq!(view.unit, "mmHg");
        assert_eq!(view.fields.len(), 6);
        assert_eq!(view.rows[0].predicted_bp_systolic, Some(120.0));
        assert_eq!(view.range, DisplayRange { min: 76.0, max: 124.0 });
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("sparse".parse::<AlignPolicy>(), Ok(AlignPolicy::Sparse));
        assert_eq!(" Frame ".parse::<AlignPolicy>(), Ok(AlignPolicy::WeekFrame));
        assert!("dense".parse::<AlignPolicy>().is_err());
    }
}
