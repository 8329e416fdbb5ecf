#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

//! The scripted acceptance battery: a fixed list of puzzles with expected
//! outcomes, and a runner that classifies each solve.
//!
//! Each case pairs a serialized puzzle with one of three expectations: an
//! exact solution string, *any* valid completion, or unsolvability. Puzzles
//! with several completions carry the exact first solution the deterministic
//! search finds, which guards the candidate enumeration order and the
//! column-choice tie-break against regressions.
//!
//! The 9×9 vectors follow the Sudopedia valid-test-cases list plus a
//! selection of hard puzzles from magictour's top lists; the 16×16 vectors
//! are the hard cases of magictour's top44.

use crate::sudoku::grid::Grid;
use crate::sudoku::solver::{self, SolveOutcome};
use std::time::Duration;

/// Expected outcome of one scripted case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// The solver must find exactly this completion.
    Exact(&'static str),
    /// The solver must find some completion satisfying every constraint and
    /// preserving the givens (the puzzle has many solutions).
    AnyCompletion,
    /// The solver must report the puzzle unsolvable.
    Unsolvable,
}

/// One scripted puzzle.
#[derive(Debug, Clone, Copy)]
pub struct Case {
    /// Human-readable name, used in reports.
    pub title: &'static str,
    /// The puzzle, serialized as in [`Grid::parse`].
    pub input: &'static str,
    /// The outcome the solver must produce.
    pub expected: Expectation,
}

/// Result of running one case.
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    /// Title of the case that ran.
    pub title: &'static str,
    /// Whether the solve matched the expectation.
    pub passed: bool,
    /// Time spent in the search.
    pub elapsed: Duration,
    /// What went wrong, when something did.
    pub detail: Option<String>,
}

/// Results of a whole battery.
#[derive(Debug, Clone)]
pub struct SuiteReport {
    /// Per-case results, in battery order.
    pub outcomes: Vec<CaseOutcome>,
}

impl SuiteReport {
    /// Whether every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.passed)
    }

    /// Mean search time across the battery, in milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_ms(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let total: Duration = self.outcomes.iter().map(|outcome| outcome.elapsed).sum();
        total.as_secs_f64() * 1000.0 / self.outcomes.len() as f64
    }
}

/// Runs one case: parse, solve, classify.
#[must_use]
pub fn run_case(case: &Case) -> CaseOutcome {
    let parsed = Grid::infer_size(case.input.len())
        .and_then(|size| Grid::parse(case.input, size));
    let puzzle = match parsed {
        Ok(puzzle) => puzzle,
        Err(error) => {
            return CaseOutcome {
                title: case.title,
                passed: false,
                elapsed: Duration::ZERO,
                detail: Some(format!("failed to parse: {error}")),
            }
        }
    };

    let (outcome, elapsed) = solver::solve_timed(&puzzle);
    let verdict = classify(&puzzle, &outcome, case.expected);
    CaseOutcome {
        title: case.title,
        passed: verdict.is_ok(),
        elapsed,
        detail: verdict.err(),
    }
}

fn classify(
    puzzle: &Grid,
    outcome: &SolveOutcome,
    expected: Expectation,
) -> Result<(), String> {
    match (outcome, expected) {
        (SolveOutcome::Unsolvable, Expectation::Unsolvable) => Ok(()),
        (SolveOutcome::Unsolvable, _) => Err("no solution found".to_owned()),
        (SolveOutcome::Solved(_), Expectation::Unsolvable) => {
            Err("found a solution for an unsolvable puzzle".to_owned())
        }
        (SolveOutcome::Solved(solved), Expectation::AnyCompletion) => {
            if !solved.is_solved() {
                Err(format!("completion violates the rules: {solved}"))
            } else if !solved.preserves_givens(puzzle) {
                Err(format!("completion overwrites givens: {solved}"))
            } else {
                Ok(())
            }
        }
        (SolveOutcome::Solved(solved), Expectation::Exact(want)) => {
            let got = solved.to_string();
            if got == want {
                Ok(())
            } else {
                Err(format!("wrong solution: {got}"))
            }
        }
    }
}

/// Runs a list of cases in order.
#[must_use]
pub fn run(cases: &[Case]) -> SuiteReport {
    SuiteReport {
        outcomes: cases.iter().map(run_case).collect(),
    }
}

/// The 9×9 battery: Sudopedia valid-test-cases plus magictour hard puzzles.
pub const NINE_BY_NINE: &[Case] = &[
    Case {
        title: "Completed Puzzle",
        input: "974236158638591742125487936316754289742918563589362417867125394253649871491873625",
        expected: Expectation::Exact(
            "974236158638591742125487936316754289742918563589362417867125394253649871491873625",
        ),
    },
    Case {
        title: "Last Empty Square",
        input: "2564891733746159829817234565932748617128.6549468591327635147298127958634849362715",
        expected: Expectation::Exact(
            "256489173374615982981723456593274861712836549468591327635147298127958634849362715",
        ),
    },
    Case {
        title: "Naked Singles",
        input: "3.542.81.4879.15.6.29.5637485.793.416132.8957.74.6528.2413.9.655.867.192.965124.8",
        expected: Expectation::Exact(
            "365427819487931526129856374852793641613248957974165283241389765538674192796512438",
        ),
    },
    Case {
        title: "Hidden Singles",
        input: "..2.3...8.....8....31.2.....6..5.27..1.....5.2.4.6..31....8.6.5.......13..531.4..",
        expected: Expectation::Exact(
            "672435198549178362831629547368951274917243856254867931193784625486592713725316489",
        ),
    },
    Case {
        title: "Hard to Brute-Force",
        input: "..............3.85..1.2.......5.7.....4...1...9.......5......73..2.1........4...9",
        expected: Expectation::Exact(
            "987654321246173985351928746128537694634892157795461832519286473472319568863745219",
        ),
    },
    Case {
        title: "Hard 1",
        input: "7.8...3.....6.1...5.........4.....263...8.......1...9..9.2....4....7.5...........",
        expected: Expectation::Exact(
            "768942315934651278512738649147593826329486157856127493693215784481379562275864931",
        ),
    },
    Case {
        title: "Hard 2",
        input: "7.8...3.....2.1...5.........4.....263...8.......1...9..9.6....4....7.5...........",
        expected: Expectation::Exact(
            "728946315934251678516738249147593826369482157852167493293615784481379562675824931",
        ),
    },
    Case {
        title: "Hard 3",
        input: "3.7.4...........918........4.....7.....16.......25..........38..9....5...2.6.....",
        expected: Expectation::Exact(
            "317849265245736891869512473456398712732164958981257634174925386693481527528673149",
        ),
    },
    Case {
        title: "Hard 4",
        input: "5..7..6....38...........2..62.4............917............35.8.4.....1......9....",
        expected: Expectation::Exact(
            "582743619963821547174956238621479853348562791795318426217635984439287165856194372",
        ),
    },
    Case {
        title: "Empty",
        input: ".................................................................................",
        expected: Expectation::AnyCompletion,
    },
    Case {
        title: "Single Given",
        input: "........................................1........................................",
        expected: Expectation::AnyCompletion,
    },
    Case {
        title: "Insufficient Givens",
        input: "...........5....9...4....1.2....3.5....7.....438...2......9.....1.4...6..........",
        expected: Expectation::AnyCompletion,
    },
    Case {
        title: "Duplicate Given - Region",
        input: "..9.7...5..21..9..1...28....7...5..1..851.....5....3.......3..68........21.....87",
        expected: Expectation::Unsolvable,
    },
    Case {
        title: "Duplicate Given - Column",
        input: "6.159.....9..1............4.7.314..6.24.....5..3....1...6.....3...9.2.4......16..",
        expected: Expectation::Unsolvable,
    },
    Case {
        title: "Duplicate Given - Row",
        input: ".4.1..35.............2.5......4.89..26.....12.5.3....7..4...16.6....7....1..8..2.",
        expected: Expectation::Unsolvable,
    },
    Case {
        title: "Unsolvable Square",
        input: "..9.287..8.6..4..5..3.....46.........2.71345.........23.....5..9..4..8.7..125.3..",
        expected: Expectation::Unsolvable,
    },
    Case {
        title: "Unsolvable Region",
        input: ".9.3....1....8..46......8..4.5.6..3...32756...6..1.9.4..1......58..2....2....7.6.",
        expected: Expectation::Unsolvable,
    },
    Case {
        title: "Unsolvable Column",
        input: "....41....6.....2...2......32.6.........5..417.......2......23..48......5.1..2...",
        expected: Expectation::Unsolvable,
    },
    Case {
        title: "Unsolvable Row",
        input: "9..1....4.14.3.8....3....9....7.8..18....3..........3..21....7...9.4.5..5...16..3",
        expected: Expectation::Unsolvable,
    },
    Case {
        title: "Not Unique - 2 Solutions",
        input: ".39...12....9.7...8..4.1..6.42...79...........91...54.5..1.9..3...8.5....14...87.",
        expected: Expectation::Exact(
            "439658127156927384827431956342516798785294631691783542578149263263875419914362875",
        ),
    },
    Case {
        title: "Not Unique - 3 Solutions",
        input: "..3.....6...98..2.9426..7..45...6............1.9.5.47.....25.4.6...785...........",
        expected: Expectation::Exact(
            "783542196516987324942631758457296813238714965169853472891325647624178539375469281",
        ),
    },
    Case {
        title: "Not Unique - 4 Solutions",
        input: "....9....6..4.7..8.4.812.3.7.......5..4...9..5..371..4.5..6..4.2.17.85.9.........",
        expected: Expectation::Exact(
            "178693452623457198945812736762984315314526987589371624857169243231748569496235871",
        ),
    },
    Case {
        title: "Not Unique - 10 Solutions",
        input: "59.....486.8...3.7...2.1.......4.....753.698.....9.......8.3...2.6...7.934.....65",
        expected: Expectation::Exact(
            "592637148618459327437281596923748651175326984864195273759863412286514739341972865",
        ),
    },
    Case {
        title: "Not Unique - 125 Solutions",
        input: "...3165..8..5..1...1.89724.9.1.85.2....9.1....4.263..1.5.....1.1..4.9..2..61.8...",
        expected: Expectation::Exact(
            "294316578867524139513897246931785624682941753745263981459632817178459362326178495",
        ),
    },
    Case {
        title: "Golden Nugget [Extremely Hard]",
        input: ".......39....1...5..3..58....8..9..6.7..2....1..4.......9..8.5..2....6..4..7.....",
        expected: Expectation::Exact(
            "751864239892317465643295871238179546974526318165483927319648752527931684486752193",
        ),
    },
];

/// The 16×16 battery: the hard cases of magictour top44.
pub const SIXTEEN_BY_SIXTEEN: &[Case] = &[
    Case {
        title: "Hard 1",
        input: ".63B.EC..A..8....847..A6..B....9.....81.D.G...7E.......7..98...CF.D.....AC..2.......D.....E1..5.CE......6...GF.31A.9...B8G7.4..D2.E...45....69.F.7......E..A...5..94..6......D.....63..F79.5...A....E6.D.1...2.8...3G.FA56.......D.C...9...B1.6..2..B.5C9.....34",
        expected: Expectation::Exact(
            "D63B9ECG4A1785F258472FA6C3BED1G9A9C25813DFG6B47EEFG14BD7259836ACFBD86GE4AC532791347GDC92FBE1A856CE25A7816D49GFB31A69F53B8G724CED23EA7D45B8CG691FG7FD19B8E46AC325B594CA6E123F7D8G8C1632GF79D5EB4A9GBFE67D31A452C87183G4FA562C9EDB4D5C8329GEFB1A6762AEB15C978DFG34",
        ),
    },
    Case {
        title: "Hard 2",
        input: ".B.293.F..C.......7.B..5......C..9..C...247.F...EF..6....9B.3D..F...58G...........B3......2F1.7.....E...1.8..C.D...1...3.D...G..4.6...2.3..9A.8.12..G.86.F......A7....C...419.G......E..5....7437..........B.3.C.8...DF......E96.E.6...9......D8..G..7..C..4...A",
        expected: Expectation::Exact(
            "GB5293DF61CE48A76374B2A5DGF8E9C1D91ACGE82473F56BEF8C6147A9B53D2GFADE58G1476CB2398GB3DC649E2F1A759547EAB2138G6CFDC621F973BD5A8GE44D6G752B3CE9A18F1239G4867FADCB5EA7E53FCD8B4196G2BCF81E9A52G6D743749FA65GE8DB231C38AB4DFCG5127E965EC62B19FA37G4D821GD873EC6945FBA",
        ),
    },
    Case {
        title: "Hard 3",
        input: "4...C7B...86....8.7G.A..E3..4D..6....9....1..A3.9......D...4..5FG..A.8F..B4.3....D3...AG..F..17...6..E....2.....7....B....5.E4...1E2A..4D.....8.C.5......A.76..D........329.F....8....65.....B.3.......E91.......B..G.8...A...C.5...F.....3C79E...GD.21.....5368",
        expected: Expectation::Exact(
            "4ADFC7B325861G9E827G1A5FE3C94DB66EB58942FG1DCA37931C6GEDA7B4285FG5CA98F17B4E36D22D3E45AG69F8B17C146B7E3CGD2A85F979F8DB261C53E4GA31E2ACG4DF6B9785CF54319B8AG76E2DBGA6ED783295FC14D8972F65C4E1GBA3F78356CE91DGA24BEB49G38756A2DFC15621F4DAB83C79EGACGDB2194E7F5368",
        ),
    },
    Case {
        title: "Hard 4",
        input: ".G4..........B8...E.2.8.1..7..5......B.F26..9..3B..DA....F.9..E.2....A1.....786G561.C..4...32......C......9F.5A.....G6.......9..F...51G..2......D8C....9..E..67..E....F.AD4.C..B...7...D8.......C..E69.B....51...98...E...3....D..G.735...A4F.....35...A...2..4.",
        expected: Expectation::Exact(
            "3G4F9571CEDA6B829CE62G8314B7DF5A817AEBDF265G94C3B52DA46C3F89G7E123D9FA154BCE786G5618CE947AG32DBFG7BC3D28619F45AEEAF4G6B7D528391CFB6351GE927C8AD4D8CG42A9F3EB16751E9287F6AD45C3GBA457BC3D8G61E2F9C2AE694BG8FD5137498B1FEG5736AC2D6DG17352BCA4FE987F35D8CAE912BG46",
        ),
    },
    Case {
        title: "Hard 5",
        input: ".EB....A..F18..5..A97........3C..5G...43..B....EC.1....F.A38....26.....1...4.F..5....2.....9...G.3.8.G.6C..F......E...D...5.B.A.E...B8...7.C.4...D.....4....35..B.5F.6.......C.749..A7.5.D.2.GF.8.7...E.6.G..A...G2B5.......4.9.....6....81.7..3.....C..2B.A..GD",
        expected: Expectation::Exact(
            "DEB329CA7GF1864568A97E1B452DG3CFF5G28D439CB6A17EC714G56FEA382DB926DG9A51BE74CF385BFA428C31D967EG7348EGB6C2AFD95191ECF3D7865GB2A4E231B8FG576C94DAGD87C194AFEB3562BA5FD62EG4931C8749C6A7351D82EGFB847D3BE269G5FA1C1G2B5FA8D3C74E96AC9564GDF81E7B233F6E1C792B4A58GD",
        ),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_by_nine_battery_passes() {
        for case in NINE_BY_NINE {
            let outcome = run_case(case);
            assert!(
                outcome.passed,
                "{}: {}",
                outcome.title,
                outcome.detail.unwrap_or_default()
            );
        }
    }

    #[test]
    fn sixteen_by_sixteen_battery_passes() {
        for case in SIXTEEN_BY_SIXTEEN {
            let outcome = run_case(case);
            assert!(
                outcome.passed,
                "{}: {}",
                outcome.title,
                outcome.detail.unwrap_or_default()
            );
        }
    }

    #[test]
    fn battery_inputs_round_trip() {
        for case in NINE_BY_NINE.iter().chain(SIXTEEN_BY_SIXTEEN) {
            let size = Grid::infer_size(case.input.len()).unwrap();
            let grid = Grid::parse(case.input, size).unwrap();
            assert_eq!(grid.to_string(), case.input, "{}", case.title);
        }
    }

    #[test]
    fn report_aggregates() {
        let report = run(&NINE_BY_NINE[..2]);
        assert_eq!(report.outcomes.len(), 2);
        assert!(report.all_passed());
        assert!(report.average_ms() >= 0.0);
    }

    #[test]
    fn run_case_reports_parse_failures() {
        let broken = Case {
            title: "broken",
            input: "not a grid",
            expected: Expectation::AnyCompletion,
        };
        let outcome = run_case(&broken);
        assert!(!outcome.passed);
        assert!(outcome.detail.unwrap().contains("failed to parse"));
    }
}
