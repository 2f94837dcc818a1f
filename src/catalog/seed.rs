use crate::catalog::{
    Branch, Category, College, CollegeType, Course, Dataset, HistoricalCutoffRecord, Round,
};

pub const SEED_YEARS: [u16; 3] = [2022, 2023, 2024];

const SEED_CATEGORIES: [(Category, f64); 5] = [
    (Category::General, 1.0),
    (Category::Ews, 1.2),
    (Category::Obc, 1.3),
    (Category::Sc, 1.5),
    (Category::St, 1.7),
];

struct SeedCollege {
    code: &'static str,
    name: &'static str,
    city: &'static str,
    college_type: CollegeType,
    placement_rate: f64,
    average_package: f64,
    annual_fee: u32,
    branches: &'static [(&'static str, u32)],
}

const SEED_COLLEGES: [SeedCollege; 5] = [
    SeedCollege {
        code: "DAIICT",
        name: "Dhirubhai Ambani Institute of Information and Communication Technology",
        city: "Gandhinagar",
        college_type: CollegeType::Private,
        placement_rate: 95.0,
        average_package: 1_200_000.0,
        annual_fee: 200_000,
        branches: &[("ICT", 500)],
    },
    SeedCollege {
        code: "LDCE",
        name: "L.D. College of Engineering",
        city: "Ahmedabad",
        college_type: CollegeType::Government,
        placement_rate: 85.0,
        average_package: 800_000.0,
        annual_fee: 120_000,
        branches: &[
            ("Computer Engineering", 1000),
            ("IT", 1200),
            ("Civil Engineering", 2000),
            ("Mechanical Engineering", 1800),
            ("Electrical Engineering", 1500),
        ],
    },
    SeedCollege {
        code: "BVM",
        name: "Birla Vishvakarma Mahavidyalaya",
        city: "Anand",
        college_type: CollegeType::GrantInAid,
        placement_rate: 80.0,
        average_package: 700_000.0,
        annual_fee: 150_000,
        branches: &[
            ("Computer Engineering", 1300),
            ("IT", 1500),
            ("Civil Engineering", 2200),
            ("Mechanical Engineering", 2000),
        ],
    },
    SeedCollege {
        code: "MSU",
        name: "Maharaja Sayajirao University",
        city: "Vadodara",
        college_type: CollegeType::Government,
        placement_rate: 82.0,
        average_package: 750_000.0,
        annual_fee: 130_000,
        branches: &[
            ("Computer Engineering", 1400),
            ("IT", 1600),
            ("Civil Engineering", 2300),
            ("Chemical Engineering", 2100),
        ],
    },
    SeedCollege {
        code: "NU",
        name: "Nirma University",
        city: "Ahmedabad",
        college_type: CollegeType::Private,
        placement_rate: 90.0,
        average_package: 900_000.0,
        annual_fee: 180_000,
        branches: &[
            ("Computer Engineering", 800),
            ("IT", 1000),
            ("Mechanical Engineering", 1600),
            ("Chemical Engineering", 1800),
        ],
    },
];

/// Demo dataset: five ACPC colleges with a synthetic cutoff series per branch.
///
/// Each branch gets one record per year, round and category. Cutoffs improve
/// by 100 ranks per year, loosen by 200 ranks per round, and scale by a
/// category multiplier; the opening rank is 80% of the closing rank.
pub fn seed_dataset() -> Dataset {
    let mut colleges = Vec::with_capacity(SEED_COLLEGES.len());
    let mut branches = Vec::new();
    let mut historical_cutoffs = Vec::new();

    for (college_idx, seed) in SEED_COLLEGES.iter().enumerate() {
        let college_id = college_idx as u32 + 1;
        colleges.push(College {
            id: college_id,
            name: seed.name.to_string(),
            city: seed.city.to_string(),
            college_type: seed.college_type,
            annual_fee: seed.annual_fee,
            placement_rate: Some(seed.placement_rate),
            average_package: Some(seed.average_package),
            institute_code: Some(seed.code.to_string()),
        });

        for (name, cutoff_rank) in seed.branches {
            let branch_id = branches.len() as u32 + 1;
            branches.push(Branch {
                id: branch_id,
                college_id,
                name: name.to_string(),
                course: Course::BeBtech,
                seats: 120,
                cutoff_rank: Some(*cutoff_rank),
            });
            historical_cutoffs.extend(cutoff_series(college_id, branch_id, *cutoff_rank));
        }
    }

    Dataset {
        colleges,
        branches,
        historical_cutoffs,
    }
}

fn cutoff_series(
    college_id: u32,
    branch_id: u32,
    cutoff_rank: u32,
) -> impl Iterator<Item = HistoricalCutoffRecord> {
    SEED_YEARS.into_iter().flat_map(move |year| {
        Round::ALL.into_iter().flat_map(move |round| {
            SEED_CATEGORIES.into_iter().map(move |(category, multiplier)| {
                let base = f64::from(cutoff_rank) - f64::from(year - SEED_YEARS[0]) * 100.0
                    + round.index() as f64 * 200.0;
                HistoricalCutoffRecord {
                    college_id,
                    branch_id,
                    year,
                    round,
                    category,
                    closing_rank: (base * multiplier).floor() as u32,
                    opening_rank: (base * multiplier * 0.8).floor() as u32,
                }
            })
        })
    })
}
