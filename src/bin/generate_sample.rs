use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Blank the cell with probability `p`.
    fn maybe_blank(&mut self, value: String, p: f64) -> String {
        if self.next_f64() < p {
            String::new()
        } else {
            value
        }
    }
}

const ROWS: usize = 500;
const MISSING_RATE: f64 = 0.03;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let educations = ["High School", "Associate", "Bachelor", "Master", "Doctorate"];
    let extracurricular = ["Yes", "No"];

    let output_path = "student_performance_prediction.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "Student ID",
        "Study Hours per Week",
        "Attendance Rate",
        "Previous Grades",
        "Participation in Extracurricular Activities",
        "Parent Education Level",
        "Passed",
    ])?;

    for id in 0..ROWS {
        let hours = rng.gauss(10.0, 5.0).clamp(0.0, 40.0);
        let attendance = rng.gauss(75.0, 12.0).clamp(30.0, 100.0);
        let grades = rng.gauss(65.0, 15.0).clamp(0.0, 100.0);
        let activity = rng.pick(&extracurricular);
        let education = rng.pick(&educations);

        // Passing likelihood rises with effort, attendance and history.
        let score = 0.04 * hours + 0.02 * attendance + 0.02 * grades - 3.2;
        let passed = if score + rng.gauss(0.0, 0.6) > 0.0 { "Yes" } else { "No" };

        let hours = rng.maybe_blank(format!("{hours:.2}"), MISSING_RATE);
        let attendance = rng.maybe_blank(format!("{attendance:.2}"), MISSING_RATE);
        let grades = rng.maybe_blank(format!("{grades:.2}"), MISSING_RATE);
        let activity = rng.maybe_blank(activity.to_string(), MISSING_RATE);
        let education = rng.maybe_blank(education.to_string(), MISSING_RATE);

        writer.write_record([
            format!("S{id:05}").as_str(),
            hours.as_str(),
            attendance.as_str(),
            grades.as_str(),
            activity.as_str(),
            education.as_str(),
            passed,
        ])?;
    }
    writer.flush()?;

    println!("Wrote {ROWS} student records to {output_path}");
    Ok(())
}
