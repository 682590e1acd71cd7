use super::types::PeriodReadings;

/// Time-weighted daily glucose average.
///
/// Each represented period contributes its own cascading average, the
/// mean of every present reading up to and including that period, and
/// the final figure is the mean of those per-period contributions. A
/// morning reading is therefore folded in again by every later period,
/// weighting the day's figure toward its earlier readings so that the
/// evening insulin decision reflects the whole day's trend rather than
/// the last reading alone.
///
/// The contribution count increments once per represented period, not
/// once per raw measurement; [`PeriodReadings`] already collapses
/// within-period duplicates to the latest reading.
///
/// Returns None when no period has a reading.
pub fn weighted_average(readings: &PeriodReadings) -> Option<f64> {
    let mut total = 0.0;
    let mut count = 0u32;

    if let Some(morning) = readings.morning {
        total += morning;
        count += 1;
    }

    if let Some(noon) = readings.noon {
        let noon_avg = match readings.morning {
            Some(morning) => (morning + noon) / 2.0,
            None => noon,
        };
        total += noon_avg;
        count += 1;
    }

    if let Some(afternoon) = readings.afternoon {
        let mut values: Vec<f64> = [readings.morning, readings.noon]
            .into_iter()
            .flatten()
            .collect();
        values.push(afternoon);
        total += values.iter().sum::<f64>() / values.len() as f64;
        count += 1;
    }

    if let Some(evening) = readings.evening {
        let mut values: Vec<f64> = [readings.morning, readings.noon, readings.afternoon]
            .into_iter()
            .flatten()
            .collect();
        values.push(evening);
        total += values.iter().sum::<f64>() / values.len() as f64;
        count += 1;
    }

    if let Some(night) = readings.night {
        let mut values: Vec<f64> = [
            readings.morning,
            readings.noon,
            readings.afternoon,
            readings.evening,
        ]
        .into_iter()
        .flatten()
        .collect();
        values.push(night);
        total += values.iter().sum::<f64>() / values.len() as f64;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    Some(total / f64::from(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(
        morning: Option<f64>,
        noon: Option<f64>,
        afternoon: Option<f64>,
        evening: Option<f64>,
        night: Option<f64>,
    ) -> PeriodReadings {
        PeriodReadings {
            morning,
            noon,
            afternoon,
            evening,
            night,
        }
    }

    #[test]
    fn no_readings_yield_no_average() {
        assert_eq!(weighted_average(&PeriodReadings::default()), None);
    }

    #[test]
    fn single_morning_reading_is_its_own_average() {
        let avg = weighted_average(&readings(Some(84.0), None, None, None, None));
        assert_eq!(avg, Some(84.0));
    }

    #[test]
    fn single_night_reading_is_its_own_average() {
        let avg = weighted_average(&readings(None, None, None, None, Some(210.0)));
        assert_eq!(avg, Some(210.0));
    }

    #[test]
    fn morning_and_noon_weight_the_morning() {
        // morning contributes 80; noon contributes (80+120)/2 = 100;
        // final = (80 + 100) / 2 = 90, not the plain mean 100.
        let avg = weighted_average(&readings(Some(80.0), Some(120.0), None, None, None));
        assert_eq!(avg, Some(90.0));
    }

    #[test]
    fn noon_without_morning_stands_alone() {
        let avg = weighted_average(&readings(None, Some(120.0), None, None, None));
        assert_eq!(avg, Some(120.0));
    }

    #[test]
    fn full_day_leans_toward_the_morning() {
        // Contributions: 100, 105, 110, 115, 120 → 110. The plain mean
        // of the five readings would be 120.
        let avg = weighted_average(&readings(
            Some(100.0),
            Some(110.0),
            Some(120.0),
            Some(130.0),
            Some(140.0),
        ));
        assert_eq!(avg, Some(110.0));
    }

    #[test]
    fn sparse_day_skips_absent_periods() {
        // morning 90 and night 150: morning contributes 90, night
        // contributes (90+150)/2 = 120; final = 105.
        let avg = weighted_average(&readings(Some(90.0), None, None, None, Some(150.0)));
        assert_eq!(avg, Some(105.0));
    }

    #[test]
    fn flat_day_averages_to_itself() {
        // Identical readings collapse every cascading step to the same
        // value regardless of which periods are present.
        for r in [
            readings(Some(100.0), Some(100.0), None, None, None),
            readings(Some(100.0), None, Some(100.0), None, Some(100.0)),
            readings(
                Some(100.0),
                Some(100.0),
                Some(100.0),
                Some(100.0),
                Some(100.0),
            ),
        ] {
            assert_eq!(weighted_average(&r), Some(100.0));
        }
    }
}
