//! Embedded Social Security Administration tables
//!
//! Wage indexes are in cents. Cost-of-living adjustments are percentages
//! applied in December of the listed year. Projections past the final
//! published year follow the trustees' intermediate assumptions.

/// First year of [`AVERAGE_WAGE_INDEX`]
pub const AWI_FIRST_YEAR: i16 = 1951;

/// Last year with a published (non-projected) wage index
pub const AWI_LAST_FINAL_YEAR: i16 = 2016;

/// National average wage index by year, 1951 onward (cents)
#[rustfmt::skip]
pub const AVERAGE_WAGE_INDEX: [i64; 120] = [
    // Final, 1951-2016 (ssa.gov/oact/COLA/AWI.html)
    279_916, 297_332, 313_944, 315_564, 330_144, 353_236,
    364_172, 367_380, 385_580, 400_712, 408_676, 429_140,
    439_664, 457_632, 465_872, 493_836, 521_344, 557_176,
    589_376, 618_624, 649_708, 713_380, 758_016, 803_076,
    863_092, 922_648, 977_944, 1_055_603, 1_147_946, 1_251_346,
    1_377_310, 1_453_134, 1_523_924, 1_613_507, 1_682_251, 1_732_182,
    1_842_651, 1_933_404, 2_009_955, 2_102_798, 2_181_160, 2_293_542,
    2_313_267, 2_375_353, 2_470_566, 2_591_390, 2_742_600, 2_886_144,
    3_046_984, 3_215_482, 3_292_192, 3_325_209, 3_406_495, 3_564_855,
    3_695_294, 3_865_141, 4_040_548, 4_133_497, 4_071_161, 4_167_383,
    4_297_961, 4_432_167, 4_488_816, 4_648_152, 4_809_863, 4_866_473,
    // Projected, 2017-2070
    5_056_265, 5_298_965, 5_537_418, 5_775_526, 6_018_098, 6_252_803,
    6_484_156, 6_730_553, 6_986_314, 7_251_793, 7_527_361, 7_813_400,
    8_110_309, 8_418_500, 8_738_403, 9_070_462, 9_415_139, 9_772_914,
    10_144_284, 10_529_766, 10_929_897, 11_345_233, 11_776_351, 12_223_852,
    12_688_358, 13_170_515, 13_670_994, 14_190_491, 14_729_729, 15_289_458,
    15_870_457, 16_473_534, 17_099_528, 17_749_310, 18_423_783, 19_123_886,
    19_850_593, 20_604_915, 21_387_901, 22_200_641, 23_044_265, 23_919_947,
    24_828_904, 25_772_402, 26_751_753, 27_768_319, 28_823_515, 29_918_808,
    31_055_722, 32_235_839, 33_460_800, 34_732_310, 36_052_137, 37_422_118,
];

/// First year of [`COST_OF_LIVING_ADJUSTMENTS`]
pub const COLA_FIRST_YEAR: i16 = 1975;

/// Cost-of-living adjustments by year, 1975 onward (percent)
#[rustfmt::skip]
pub const COST_OF_LIVING_ADJUSTMENTS: [f64; 96] = [
    // Final, 1975-2017 (ssa.gov/oact/COLA/colaseries.html)
    8.0, 6.4, 5.9, 6.5, 9.9, 14.3, 11.2, 7.4, 3.5, 3.5, 3.1, 1.3,
    4.2, 4.0, 4.7, 5.4, 3.7, 3.0, 2.6, 2.8, 2.6, 2.9, 2.1, 1.3,
    2.5, 3.5, 2.6, 1.4, 2.1, 2.7, 4.1, 3.3, 2.3, 5.8, 0.0, 0.0,
    3.6, 1.7, 1.5, 1.7, 0.0, 0.3, 2.0,
    // Projected, 2018-2070
    3.1, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6,
    2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6,
    2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6,
    2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6, 2.6,
    2.6, 2.6, 2.6, 2.6, 2.6,
];

/// Bend points for people turning 62 in 1979 (cents); later cohorts scale
/// these by wage growth.
pub const BEND_POINTS_1979: [i64; 2] = [18_000, 108_500];

/// Full retirement age (years, months) for the transition birth years
pub const TRANSITION_YEARS: [(i16, i32, i32); 10] = [
    (1938, 65, 2),
    (1939, 65, 4),
    (1940, 65, 6),
    (1941, 65, 8),
    (1942, 65, 10),
    (1955, 66, 2),
    (1956, 66, 4),
    (1957, 66, 6),
    (1958, 66, 8),
    (1959, 66, 10),
];

/// Delayed retirement credit per month, in 24ths of a percent, for birth
/// years 1925-1942. Earlier cohorts earn 6/24, later ones 16/24.
pub const DELAY_RATES_24THS: [(i16, i32); 18] = [
    (1925, 7),
    (1926, 7),
    (1927, 8),
    (1928, 8),
    (1929, 9),
    (1930, 9),
    (1931, 10),
    (1932, 10),
    (1933, 11),
    (1934, 11),
    (1935, 12),
    (1936, 12),
    (1937, 13),
    (1938, 13),
    (1939, 14),
    (1940, 14),
    (1941, 15),
    (1942, 15),
];

/// Projected yearly wage-index growth (percent); years past the last entry
/// reuse it.
const AWI_PROJECTED_GROWTH: [(i16, f64); 10] = [
    (2017, 3.9),
    (2018, 4.8),
    (2019, 4.5),
    (2020, 4.3),
    (2021, 4.2),
    (2022, 3.9),
    (2023, 3.7),
    (2024, 3.8),
    (2025, 3.8),
    (2026, 3.8),
];

/// Wage index for `year`, if the table covers it
pub fn wage_index(year: i16) -> Option<i64> {
    let offset = usize::try_from(year - AWI_FIRST_YEAR).ok()?;
    AVERAGE_WAGE_INDEX.get(offset).copied()
}

/// Cost-of-living adjustment (percent) for `year`, if the table covers it
pub fn cost_of_living(year: i16) -> Option<f64> {
    let offset = usize::try_from(year - COLA_FIRST_YEAR).ok()?;
    COST_OF_LIVING_ADJUSTMENTS.get(offset).copied()
}

/// Rebuild the projected wage index from the last published year.
///
/// This is how the projected part of [`AVERAGE_WAGE_INDEX`] was produced.
pub fn project_wage_index(through: i16) -> Vec<i64> {
    let mut last = AVERAGE_WAGE_INDEX[(AWI_LAST_FINAL_YEAR - AWI_FIRST_YEAR) as usize];
    let last_rate = AWI_PROJECTED_GROWTH[AWI_PROJECTED_GROWTH.len() - 1].1;
    ((AWI_LAST_FINAL_YEAR + 1)..=through)
        .map(|year| {
            let growth = AWI_PROJECTED_GROWTH
                .iter()
                .find(|(y, _)| *y == year)
                .map_or(last_rate, |(_, g)| *g);
            last = (last as f64 * ((100.0 + growth) / 100.0)).floor() as i64;
            last
        })
        .collect()
}
