pub mod vector2d;

/// `n` evenly spaced samples over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let spacing = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + spacing * i as f64).collect();
            points[n - 1] = end;
            points
        }
    }
}
