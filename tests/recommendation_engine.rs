use admission_advisor::catalog::seed::seed_dataset;
use admission_advisor::catalog::{
    Branch, Catalog, Category, College, CollegeType, Course, CutoffTable,
    HistoricalCutoffRecord, Round,
};
use admission_advisor::ranking::score_recommendations;
use admission_advisor::{
    estimate_admission_chance, filter_eligible_colleges, is_eligible, rank_recommendations,
    select_colleges, Chance, FilterValues, PredictionResult,
};

fn seed_catalog() -> Catalog {
    Catalog::from_dataset(seed_dataset()).expect("seed dataset validates")
}

fn expected_chance(percentage: u8) -> Chance {
    if percentage >= 70 {
        Chance::High
    } else if percentage >= 40 {
        Chance::Medium
    } else {
        Chance::Low
    }
}

fn government_college() -> College {
    College {
        id: 10,
        name: "Government Engineering College".to_string(),
        city: "Gandhinagar".to_string(),
        college_type: CollegeType::Government,
        annual_fee: 15_000,
        placement_rate: Some(90.0),
        average_package: Some(450_000.0),
        institute_code: Some("GECG".to_string()),
    }
}

fn branch_with_cutoff(cutoff_rank: Option<u32>) -> Branch {
    Branch {
        id: 20,
        college_id: 10,
        name: "Electronics & Communication".to_string(),
        course: Course::BeBtech,
        seats: 120,
        cutoff_rank,
    }
}

#[test]
fn no_rank_always_gives_neutral_estimate() {
    let catalog = seed_catalog();
    let filters = FilterValues::default();
    for branch in catalog.branches() {
        let college = catalog.college(branch.college_id).expect("owner college");
        assert_eq!(
            estimate_admission_chance(college, branch, &filters, catalog.cutoffs()),
            PredictionResult {
                chance: Chance::Medium,
                percentage: 50
            }
        );
    }
}

#[test]
fn historical_averages_drive_the_estimate() {
    let college = government_college();
    let branch = branch_with_cutoff(Some(3000));
    let cutoffs = CutoffTable::new(
        [(2021, 480, 880), (2022, 500, 900), (2023, 520, 920)]
            .into_iter()
            .map(|(year, opening, closing)| HistoricalCutoffRecord {
                college_id: 10,
                branch_id: 20,
                year,
                round: Round::First,
                category: Category::Ews,
                opening_rank: opening,
                closing_rank: closing,
            })
            .collect(),
    );
    let filters = FilterValues::default()
        .with_round(Round::First)
        .with_category(Category::Ews);

    let within = filters.clone().with_rank(400);
    assert_eq!(
        estimate_admission_chance(&college, &branch, &within, &cutoffs),
        PredictionResult {
            chance: Chance::High,
            percentage: 95
        }
    );

    let beyond = filters.clone().with_rank(901);
    assert_eq!(
        estimate_admission_chance(&college, &branch, &beyond, &cutoffs),
        PredictionResult {
            chance: Chance::Low,
            percentage: 15
        }
    );
}

#[test]
fn fallback_uses_weighted_branch_cutoff() {
    let college = government_college();
    let branch = branch_with_cutoff(Some(1000));
    let filters = FilterValues::default().with_rank(500);
    // 1000 * 0.9 * 1.1 = 990; 500 <= 594
    assert_eq!(
        estimate_admission_chance(&college, &branch, &filters, &CutoffTable::default()),
        PredictionResult {
            chance: Chance::High,
            percentage: 90
        }
    );
}

#[test]
fn seed_history_places_ranks_against_cohort_averages() {
    let catalog = seed_catalog();
    let ldce = catalog.find_college("LDCE").expect("LDCE");
    let computer = catalog
        .find_branch(ldce.id, "Computer Engineering")
        .expect("LDCE computer engineering");
    // general mock closings 1000/900/800, openings 800/720/640
    let comfortable = FilterValues::default().with_rank(700);
    assert_eq!(
        estimate_admission_chance(ldce, computer, &comfortable, catalog.cutoffs()).percentage,
        95
    );
    let middle = FilterValues::default().with_rank(810);
    let result = estimate_admission_chance(ldce, computer, &middle, catalog.cutoffs());
    // 95 - (90 / 180) * 60
    assert_eq!(result.percentage, 65);
    assert_eq!(result.chance, Chance::Medium);
}

#[test]
fn percentages_stay_in_range_and_agree_with_labels() {
    let catalog = seed_catalog();
    for rank in [1, 250, 640, 700, 901, 1250, 1800, 2600, 5000, 40_000] {
        for round in Round::ALL {
            for category in Category::ALL {
                let filters = FilterValues::default()
                    .with_rank(rank)
                    .with_round(round)
                    .with_category(category);
                for branch in catalog.branches() {
                    let college = catalog.college(branch.college_id).expect("owner");
                    let result =
                        estimate_admission_chance(college, branch, &filters, catalog.cutoffs());
                    assert!(result.percentage <= 100);
                    assert_eq!(result.chance, expected_chance(result.percentage));
                }
            }
        }
    }
}

#[test]
fn ranking_is_empty_without_rank() {
    let catalog = seed_catalog();
    let ranked = rank_recommendations(
        catalog.colleges(),
        catalog.branches(),
        &FilterValues::default(),
        catalog.cutoffs(),
    );
    assert!(ranked.is_empty());
}

#[test]
fn ranking_scores_never_increase() {
    let catalog = seed_catalog();
    for rank in [300, 900, 1500, 3000] {
        for round in Round::ALL {
            let filters = FilterValues::default().with_rank(rank).with_round(round);
            let scored = score_recommendations(
                catalog.colleges(),
                catalog.branches(),
                &filters,
                catalog.cutoffs(),
            );
            assert_eq!(scored.len(), catalog.branches().len());
            for pair in scored.windows(2) {
                assert!(pair[0].score >= pair[1].score);
            }
        }
    }
}

#[test]
fn ranking_yields_one_entry_per_eligible_branch() {
    let catalog = seed_catalog();
    let filters = FilterValues::default()
        .with_rank(1100)
        .with_branches(["Computer Engineering", "IT"])
        .with_college_types([CollegeType::Government]);
    let ranked = rank_recommendations(
        catalog.colleges(),
        catalog.branches(),
        &filters,
        catalog.cutoffs(),
    );
    // LDCE and MSU, two branches each
    assert_eq!(ranked.len(), 4);
    assert!(ranked
        .iter()
        .all(|r| r.college.college_type == CollegeType::Government));
    for item in &ranked {
        assert!(is_eligible(
            &item.college,
            Some(&item.branch),
            catalog.branches(),
            &filters
        ));
    }
}

#[test]
fn fee_ceiling_always_excludes() {
    let catalog = seed_catalog();
    let filters = FilterValues::default().with_max_fee(150_000);
    let eligible = filter_eligible_colleges(catalog.colleges(), catalog.branches(), &filters);
    let codes: Vec<&str> = eligible
        .iter()
        .filter_map(|c| c.institute_code.as_deref())
        .collect();
    assert_eq!(codes, vec!["LDCE", "BVM", "MSU"]);
    assert!(eligible.iter().all(|c| c.annual_fee <= 150_000));

    let ranked_mode = select_colleges(
        catalog.colleges(),
        catalog.branches(),
        &filters.clone().with_rank(500),
        catalog.cutoffs(),
    );
    assert!(ranked_mode.iter().all(|c| c.annual_fee <= 150_000));
    assert_eq!(ranked_mode.len(), 3);
}

#[test]
fn degraded_mode_requires_a_matching_branch() {
    let catalog = seed_catalog();
    let chemical = FilterValues::default().with_branches(["Chemical Engineering"]);
    let codes: Vec<&str> = filter_eligible_colleges(catalog.colleges(), catalog.branches(), &chemical)
        .iter()
        .filter_map(|c| c.institute_code.as_deref())
        .collect();
    assert_eq!(codes, vec!["MSU", "NU"]);

    let pharmacy = FilterValues::default().with_course(Course::Pharmacy);
    assert!(filter_eligible_colleges(catalog.colleges(), catalog.branches(), &pharmacy).is_empty());
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let catalog = seed_catalog();
    let filters = FilterValues::default()
        .with_rank(1234)
        .with_round(Round::Second)
        .with_category(Category::Obc);
    let first = rank_recommendations(
        catalog.colleges(),
        catalog.branches(),
        &filters,
        catalog.cutoffs(),
    );
    let second = rank_recommendations(
        catalog.colleges(),
        catalog.branches(),
        &filters,
        catalog.cutoffs(),
    );
    assert_eq!(first, second);
}

#[test]
fn merging_a_known_cutoff_row_is_rejected_and_keeps_estimates() {
    let mut catalog = seed_catalog();
    let ldce = catalog.find_college("LDCE").expect("LDCE").clone();
    let computer = catalog
        .find_branch(ldce.id, "Computer Engineering")
        .expect("LDCE computer engineering")
        .clone();
    let filters = FilterValues::default().with_rank(810);
    let before = estimate_admission_chance(&ldce, &computer, &filters, catalog.cutoffs());

    let repeat = HistoricalCutoffRecord {
        college_id: ldce.id,
        branch_id: computer.id,
        year: 2024,
        round: Round::Mock,
        category: Category::General,
        opening_rank: 100,
        closing_rank: 200,
    };
    assert!(catalog.merge_cutoffs(vec![repeat]).is_err());

    let after = estimate_admission_chance(&ldce, &computer, &filters, catalog.cutoffs());
    assert_eq!(before, after);
    assert_eq!(after.percentage, 65);
}
