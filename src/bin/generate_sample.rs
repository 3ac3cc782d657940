//! Writes a deterministic `cleaned_books_data.csv` sample inventory for
//! trying out the dashboard without real data.

use serde::Serialize;

#[derive(Serialize)]
struct Row<'a> {
    title: String,
    price: f64,
    title_length: u32,
    price_category: &'a str,
    rating_four: bool,
    rating_three: bool,
    rating_two: bool,
    rating_one: bool,
}

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let adjectives = [
        "Silent", "Crimson", "Forgotten", "Golden", "Hollow", "Winter", "Electric", "Paper",
    ];
    let nouns = [
        "Garden", "Atlas", "Library", "Horizon", "Machine", "Harbor", "Orchard", "Cartographer",
    ];
    let suffixes = ["", " of Glass", " at Midnight", ": A Memoir", " and Other Stories"];

    // (category, price range, share of the catalogue)
    let categories: [(&str, (f64, f64), usize); 3] = [
        ("Low", (4.0, 20.0), 120),
        ("Medium", (20.0, 45.0), 80),
        ("High", (45.0, 120.0), 40),
    ];

    let output_path = "cleaned_books_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    let mut total = 0usize;
    for (category, (lo, hi), count) in categories {
        for _ in 0..count {
            let title = format!(
                "The {} {}{}",
                rng.pick(&adjectives),
                rng.pick(&nouns),
                rng.pick(&suffixes)
            );
            let price = ((lo + (hi - lo) * rng.next_f64()) * 100.0).round() / 100.0;

            // Mostly one-hot indicators; a slice of rows carries no flag at
            // all and lands on the implied five-star default.
            let roll = rng.next_u64() % 10;
            let (four, three, two, one) = match roll {
                0..=2 => (true, false, false, false),
                3..=4 => (false, true, false, false),
                5 => (false, false, true, false),
                6 => (false, false, false, true),
                _ => (false, false, false, false),
            };

            writer
                .serialize(Row {
                    title_length: title.chars().count() as u32,
                    title,
                    price,
                    price_category: category,
                    rating_four: four,
                    rating_three: three,
                    rating_two: two,
                    rating_one: one,
                })
                .expect("Failed to write row");
            total += 1;
        }
    }

    writer.flush().expect("Failed to flush CSV");
    println!("Wrote {total} books to {output_path}");
}
