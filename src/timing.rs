//! Run-time measurement and text tables of run-times.
//!
//! Inputs are produced by *generators*, functions from an input size to an input. Sizes start at `start` and
//! are doubled `double` times. All times in one table share the unit chosen for the first measurement.

use std::hint::black_box;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Maximum number of series in one table.
pub const MAX_SERIES: usize = 6;

/// Names are truncated to this many characters in table headers.
const NAME_WIDTH: usize = 15;

#[derive(Debug, Error)]
pub enum TimingError {
    #[error("repeat must be positive")]
    NonPositiveRepeat,

    #[error("the start size must be positive")]
    NonPositiveStart,

    #[error("there must be 1 to {MAX_SERIES} input functions")]
    CaseCount,

    #[error("there must be 1 to {MAX_SERIES} functions")]
    FunctionCount,

    #[error("input size overflows after {0} doublings")]
    SizeOverflow(u32),

    #[error("cannot write the run-time table: {0}")]
    Io(#[from] io::Error),
}

/// Loop and repeat settings for a single measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingConfig {
    /// Calls per sample; `0` picks the count automatically
    pub loops: u64,
    /// Samples per measurement; the fastest one is kept
    pub repeat: usize,
    /// Minimum sample duration when `loops` is picked automatically
    pub min_time: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loops: 0,
            repeat: 3,
            min_time: Duration::from_millis(200),
        }
    }
}

impl TimingConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed number of calls per sample
    pub fn with_loops(mut self, loops: u64) -> Self {
        self.loops = loops;
        self
    }

    /// Set the number of samples
    pub fn with_repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set the minimum sample duration used by automatic loop counts
    pub fn with_min_time(mut self, min_time: Duration) -> Self {
        self.min_time = min_time;
        self
    }
}

/// A named input generator: input size to input.
pub type Generator<'a, T> = (&'a str, &'a dyn Fn(usize) -> T);

/// A named function to time on generated inputs.
pub type Timed<'a, T, R> = (&'a str, &'a dyn Fn(&T) -> R);

/// Generator for functions that take a single integer: the input is the size itself.
pub fn int_value(n: usize) -> usize {
    n
}

/// Pick the display scale and unit for a time in seconds.
///
/// ## Examples
/// ```rust
/// use algoesup::timing::scale_and_unit;
/// assert_eq!(scale_and_unit(5e-7), (1_000_000_000, "ns"));
/// assert_eq!(scale_and_unit(2.0), (1, "s"));
/// ```
pub fn scale_and_unit(seconds: f64) -> (u64, &'static str) {
    if seconds < 1e-6 {
        (1_000_000_000, "ns")
    } else if seconds < 1e-3 {
        (1_000_000, "µs")
    } else if seconds < 1.0 {
        (1_000, "ms")
    } else {
        (1, "s")
    }
}

fn run_loops<F: FnMut()>(f: &mut F, loops: u64) -> Duration {
    let start = Instant::now();
    for _ in 0..loops {
        f();
    }
    start.elapsed()
}

/// Find a loop count whose sample takes at least `min_time`: 1, 2, 5, 10, 20, 50, ...
fn autorange<F: FnMut()>(f: &mut F, min_time: Duration) -> (u64, Duration) {
    let mut base: u64 = 1;
    loop {
        for factor in [1, 2, 5] {
            let loops = base.saturating_mul(factor);
            let taken = run_loops(f, loops);
            if taken >= min_time || loops == u64::MAX {
                return (loops, taken);
            }
        }
        base = base.saturating_mul(10);
    }
}

/// Return the fastest time, in seconds, of one call of `f`.
///
/// With `config.loops == 0`, enough loops are used for a sample to take at least `config.min_time`, and the
/// calibration sample counts as one of the `repeat` samples.
///
/// ## Errors
/// - `TimingError::NonPositiveRepeat` if `config.repeat` is zero.
pub fn time_it<F: FnMut()>(mut f: F, config: &TimingConfig) -> Result<f64, TimingError> {
    if config.repeat == 0 {
        return Err(TimingError::NonPositiveRepeat);
    }

    let (loops, mut samples) = if config.loops == 0 {
        let (loops, taken) = autorange(&mut f, config.min_time);
        (loops, vec![taken])
    } else {
        (config.loops, Vec::with_capacity(config.repeat))
    };
    while samples.len() < config.repeat {
        samples.push(run_loops(&mut f, loops));
    }

    let fastest = samples.iter().min().copied().unwrap_or_default();
    Ok(fastest.as_secs_f64() / loops as f64)
}

/// Scaled run-times for one table: one series per case or function, one point per size.
#[derive(Debug, Clone, PartialEq)]
pub struct RunTimes {
    pub sizes: Vec<usize>,
    pub unit: &'static str,
    pub series: Vec<(String, Vec<f64>)>,
}

impl RunTimes {
    /// Render the table as text.
    ///
    /// ## Parameters
    /// - `title`: first line, followed by a blank line.
    /// - `x_label`: header of the size column; sizes are right-aligned to its width.
    pub fn render(&self, title: &str, x_label: &str) -> String {
        let width = x_label.chars().count();
        let mut out = format!("{title}\n\n{x_label} ");
        for (name, _) in &self.series {
            let short: String = name.chars().take(NAME_WIDTH).collect();
            out.push_str(&format!("{short:>NAME_WIDTH$} "));
        }
        for (row, size) in self.sizes.iter().enumerate() {
            out.push_str(&format!("\n{size:>width$} "));
            for (_, times) in &self.series {
                let t = times.get(row).copied().unwrap_or(f64::NAN);
                out.push_str(&format!("{t:>NAME_WIDTH$.1} "));
            }
            out.push_str(self.unit);
        }
        out.push('\n');
        out
    }
}

fn doubled_sizes(start: usize, double: u32) -> Result<Vec<usize>, TimingError> {
    if start == 0 {
        return Err(TimingError::NonPositiveStart);
    }
    let mut sizes = vec![start];
    for i in 0..double {
        let next = sizes[sizes.len() - 1]
            .checked_mul(2)
            .ok_or(TimingError::SizeOverflow(i + 1))?;
        sizes.push(next);
    }
    Ok(sizes)
}

/// Scales every raw time by the unit of the first one.
struct Scaler {
    scale: Option<(u64, &'static str)>,
}

impl Scaler {
    fn new() -> Self {
        Self { scale: None }
    }

    fn apply(&mut self, seconds: f64) -> f64 {
        let (scale, _) = *self.scale.get_or_insert_with(|| scale_and_unit(seconds));
        seconds * scale as f64
    }

    fn unit(&self) -> &'static str {
        self.scale.map_or("s", |(_, unit)| unit)
    }
}

/// Measure one function on inputs from several generators (e.g. best, normal and worst case).
///
/// ## Errors
/// - `TimingError::CaseCount` unless there are 1 to 6 generators; start and repeat errors as above.
#[tracing::instrument(skip_all, fields(function = name, cases = cases.len(), start, double))]
pub fn measure_cases<T, R>(
    name: &str,
    function: &dyn Fn(&T) -> R,
    cases: &[Generator<'_, T>],
    start: usize,
    double: u32,
    config: &TimingConfig,
) -> Result<RunTimes, TimingError> {
    if cases.is_empty() || cases.len() > MAX_SERIES {
        return Err(TimingError::CaseCount);
    }
    let sizes = doubled_sizes(start, double)?;
    let mut scaler = Scaler::new();
    let mut series: Vec<(String, Vec<f64>)> = cases.iter().map(|(n, _)| (n.to_string(), Vec::new())).collect();

    for &size in &sizes {
        for (index, (_, generator)) in cases.iter().enumerate() {
            let input = generator(size);
            let seconds = time_it(
                || {
                    black_box(function(black_box(&input)));
                },
                config,
            )?;
            series[index].1.push(scaler.apply(seconds));
        }
        tracing::debug!(size, "measured");
    }

    Ok(RunTimes {
        sizes,
        unit: scaler.unit(),
        series,
    })
}

/// Print the run-times of `function` for different input cases.
pub fn time_cases<T, R>(
    name: &str,
    function: &dyn Fn(&T) -> R,
    cases: &[Generator<'_, T>],
    start: usize,
    double: u32,
    config: &TimingConfig,
    out: &mut dyn Write,
) -> Result<RunTimes, TimingError> {
    let times = measure_cases(name, function, cases, start, double, config)?;
    out.write_all(times.render(&format!("Run-times for {name}"), "Input size").as_bytes())?;
    Ok(times)
}

/// Measure several functions on the same generated inputs.
///
/// ## Errors
/// - `TimingError::FunctionCount` unless there are 1 to 6 functions; start and repeat errors as above.
#[tracing::instrument(skip_all, fields(generator = generator.0, functions = functions.len(), start, double))]
pub fn measure_functions<T, R>(
    functions: &[Timed<'_, T, R>],
    generator: Generator<'_, T>,
    start: usize,
    double: u32,
    config: &TimingConfig,
) -> Result<RunTimes, TimingError> {
    if functions.is_empty() || functions.len() > MAX_SERIES {
        return Err(TimingError::FunctionCount);
    }
    let sizes = doubled_sizes(start, double)?;
    let mut scaler = Scaler::new();
    let mut series: Vec<(String, Vec<f64>)> = functions.iter().map(|(n, _)| (n.to_string(), Vec::new())).collect();

    for &size in &sizes {
        let input = (generator.1)(size);
        for (index, (_, function)) in functions.iter().enumerate() {
            let seconds = time_it(
                || {
                    black_box(function(black_box(&input)));
                },
                config,
            )?;
            series[index].1.push(scaler.apply(seconds));
        }
        tracing::debug!(size, "measured");
    }

    Ok(RunTimes {
        sizes,
        unit: scaler.unit(),
        series,
    })
}

/// Print the run-times of different functions for the same inputs.
///
/// `value` labels the first column `Input value` instead of `Input size`, for generators whose input is the
/// size itself.
pub fn time_functions<T, R>(
    functions: &[Timed<'_, T, R>],
    generator: Generator<'_, T>,
    start: usize,
    double: u32,
    value: bool,
    config: &TimingConfig,
    out: &mut dyn Write,
) -> Result<RunTimes, TimingError> {
    let times = measure_functions(functions, generator, start, double, config)?;
    let x_label = if value { "Input value" } else { "Input size" };
    out.write_all(times.render(&format!("Inputs generated by {}", generator.0), x_label).as_bytes())?;
    Ok(times)
}

/// Print the run-times of functions that take a single integer, for the values 1, 2, 4, ..., 1024.
pub fn time_functions_int<R>(
    functions: &[Timed<'_, usize, R>],
    config: &TimingConfig,
    out: &mut dyn Write,
) -> Result<RunTimes, TimingError> {
    time_functions_int_with(functions, ("int_value", &int_value), 1, 10, config, out)
}

/// [`time_functions_int`] with a chosen generator and sizes, still labelled `Input value`.
pub fn time_functions_int_with<R>(
    functions: &[Timed<'_, usize, R>],
    generator: Generator<'_, usize>,
    start: usize,
    double: u32,
    config: &TimingConfig,
    out: &mut dyn Write,
) -> Result<RunTimes, TimingError> {
    time_functions(functions, generator, start, double, true, config, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> TimingConfig {
        TimingConfig::new().with_loops(1).with_repeat(1)
    }

    #[test]
    fn scale_and_unit_boundaries() {
        assert_eq!(scale_and_unit(0.0), (1_000_000_000, "ns"));
        assert_eq!(scale_and_unit(1e-6), (1_000_000, "µs"));
        assert_eq!(scale_and_unit(1e-3), (1_000, "ms"));
        assert_eq!(scale_and_unit(0.999), (1_000, "ms"));
        assert_eq!(scale_and_unit(1.0), (1, "s"));
    }

    #[test]
    fn time_it_rejects_zero_repeat() {
        let err = time_it(|| (), &TimingConfig::new().with_repeat(0)).unwrap_err();
        assert_eq!(err.to_string(), "repeat must be positive");
    }

    #[test]
    fn time_it_runs_the_requested_number_of_loops() {
        let mut calls = 0;
        let t = time_it(|| calls += 1, &TimingConfig::new().with_loops(4).with_repeat(3)).unwrap();
        assert_eq!(calls, 12);
        assert!(t >= 0.0);
    }

    #[test]
    fn autorange_reuses_the_calibration_sample() {
        let mut calls = 0u64;
        let config = TimingConfig::new().with_repeat(2).with_min_time(Duration::ZERO);
        time_it(|| calls += 1, &config).unwrap();
        // One loop satisfies a zero minimum: one calibration sample plus one more.
        assert_eq!(calls, 2);
    }

    #[test]
    fn sizes_double_from_start() {
        assert_eq!(doubled_sizes(3, 3).unwrap(), vec![3, 6, 12, 24]);
        assert_eq!(doubled_sizes(1, 0).unwrap(), vec![1]);
        assert!(matches!(doubled_sizes(0, 2), Err(TimingError::NonPositiveStart)));
        assert!(matches!(doubled_sizes(usize::MAX, 1), Err(TimingError::SizeOverflow(1))));
    }

    #[test]
    fn render_layout() {
        let times = RunTimes {
            sizes: vec![1, 2],
            unit: "ns",
            series: vec![
                ("ascending".to_string(), vec![1.0, 2.26]),
                ("a very long case name".to_string(), vec![10.0, 20.0]),
            ],
        };
        let text = times.render("Run-times for sort", "Input size");
        let expected = concat!(
            "Run-times for sort\n",
            "\n",
            "Input size       ascending a very long cas \n",
            "         1             1.0            10.0 ns\n",
            "         2             2.3            20.0 ns\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn render_pads_sizes_to_label_width() {
        let times = RunTimes {
            sizes: vec![8],
            unit: "µs",
            series: vec![("f".to_string(), vec![3.0])],
        };
        let text = times.render("Inputs generated by int_value", "Input value");
        assert!(text.ends_with("\n          8             3.0 µs\n"), "{text:?}");
    }

    #[test]
    fn time_cases_writes_one_row_per_size() {
        let ascending = |n: usize| (0..n).collect::<Vec<_>>();
        let descending = |n: usize| (0..n).rev().collect::<Vec<_>>();
        let sum = |v: &Vec<usize>| v.iter().sum::<usize>();
        let cases: [Generator<'_, Vec<usize>>; 2] = [("ascending", &ascending), ("descending", &descending)];
        let mut out = Vec::new();
        let times = time_cases("sum", &sum, &cases, 4, 2, &quick(), &mut out).unwrap();
        assert_eq!(times.sizes, vec![4, 8, 16]);
        assert_eq!(times.series.len(), 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Run-times for sum\n\nInput size "));
        assert_eq!(text.lines().count(), 3 + 3);
    }

    #[test]
    fn time_cases_validates_case_count() {
        let id = |n: usize| n;
        let f = |n: &usize| *n;
        let err = time_cases::<usize, usize>("f", &f, &[], 1, 1, &quick(), &mut io::sink()).unwrap_err();
        assert_eq!(err.to_string(), "there must be 1 to 6 input functions");
        let seven: Vec<Generator<'_, usize>> = (0..7).map(|_| ("id", &id as &dyn Fn(usize) -> usize)).collect();
        assert!(matches!(
            time_cases("f", &f, &seven, 1, 1, &quick(), &mut io::sink()),
            Err(TimingError::CaseCount)
        ));
    }

    #[test]
    fn time_functions_int_uses_value_label() {
        let square = |n: &usize| n * n;
        let mut out = Vec::new();
        let functions: [Timed<'_, usize, usize>; 1] = [("square", &square)];
        let times = time_functions_int(&functions, &quick(), &mut out).unwrap();
        assert_eq!(times.sizes.len(), 11);
        assert_eq!(times.sizes[10], 1024);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Inputs generated by int_value\n\nInput value "));
    }

    #[test]
    fn time_functions_int_accepts_generator_and_sizes() {
        let odd = |n: usize| 2 * n + 1;
        let square = |n: &usize| n * n;
        let functions: [Timed<'_, usize, usize>; 1] = [("square", &square)];
        let mut out = Vec::new();
        let times = time_functions_int_with(&functions, ("odd", &odd), 5, 2, &quick(), &mut out).unwrap();
        assert_eq!(times.sizes, vec![5, 10, 20]);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Inputs generated by odd\n\nInput value "));
        assert!(matches!(
            time_functions_int_with(&functions, ("odd", &odd), 0, 2, &quick(), &mut io::sink()),
            Err(TimingError::NonPositiveStart)
        ));
    }

    #[test]
    fn time_functions_validates_function_count() {
        let err = time_functions::<usize, usize>(&[], ("int_value", &int_value), 1, 1, false, &quick(), &mut io::sink())
            .unwrap_err();
        assert_eq!(err.to_string(), "there must be 1 to 6 functions");
    }

    #[test]
    fn config_defaults() {
        let config = TimingConfig::default();
        assert_eq!(config.loops, 0);
        assert_eq!(config.repeat, 3);
        assert_eq!(config.min_time, Duration::from_millis(200));
    }
}
