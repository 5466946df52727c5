#[cfg(test)]
mod tests {
    use std::num::NonZero;
    use std::time::{Duration, Instant};

    use itertools::Itertools;

    use crate::automaton::{Automaton, Termination};
    use crate::builder::{Builder, CaveGraphBuilder, GridBuilder};
    use crate::flood::{flood_fill, BARRIER};
    use crate::paths::{enumerate_paths, VisitBudget};
    use crate::reduce::{largest_product, risk_sum};
    use crate::shape::Adjacency;
    use crate::shortest::{perimeter_bound, shortest_path};
    use crate::{input, Config, Engine, Error, Location, MalformedInput, Policy, RegionReduction};

    const HEIGHTS: &str = "2199943210
3987894921
9856789892
8767896789
9899965678
";

    const ENERGIES: &str = "5483143223
2745854711
5264556173
6141336146
6357385478
4167524645
2176841721
6882881134
4846848554
5283751526
";

    const SMALL_CAVES: &str = "start-A
start-b
A-c
A-b
b-d
A-end
b-end
";

    const MEDIUM_CAVES: &str = "dc-end
HN-start
start-kj
dc-start
dc-HN
LN-dc
HN-end
kj-sj
kj-HN
kj-dc
";

    const COSTS: &str = "1163751742
1381373672
2136511328
3694931569
7463417111
1319128137
1359912421
3125421639
1293138521
2311944581
";

    fn grid(text: &str, adjacency: Adjacency) -> crate::Grid {
        GridBuilder::with_adjacency(adjacency)
            .push_lines(input::lines(text).unwrap())
            .build()
            .unwrap()
    }

    fn caves(text: &str) -> crate::graph::CaveGraph {
        CaveGraphBuilder::default()
            .push_lines(input::lines(text).unwrap())
            .build()
            .unwrap()
    }

    fn answer(policy: Policy, text: &str) -> Option<u64> {
        Engine::default().run(policy, text).unwrap().answer().value()
    }

    #[test]
    fn grid_round_trip() {
        assert_eq!(grid(HEIGHTS, Adjacency::Orthogonal).to_string(), HEIGHTS);
    }

    #[test]
    fn grid_neighbors_clamped() {
        let orthogonal = grid("123\n456\n789", Adjacency::Orthogonal);
        assert_eq!(orthogonal.neighbors(Location(0, 0)), &[Location(0, 1), Location(1, 0)]);
        assert_eq!(orthogonal.neighbors(Location(1, 0)).len(), 3);
        assert_eq!(orthogonal.neighbors(Location(1, 1)).len(), 4);
        assert!(orthogonal.neighbors(Location(3, 0)).is_empty());

        let diagonal = grid("123\n456\n789", Adjacency::Diagonal);
        assert_eq!(diagonal.neighbors(Location(0, 0)), &[Location(1, 0), Location(0, 1), Location(1, 1)]);
        assert_eq!(diagonal.neighbors(Location(1, 0)).len(), 5);
        assert_eq!(diagonal.neighbors(Location(1, 1)).len(), 8);
        assert_eq!(diagonal.value(Location(2, 1)), Some(6));
        assert_eq!(diagonal.value(Location(2, 3)), None);
    }

    #[test]
    fn grid_rejects_ragged_rows() {
        let mut builder = GridBuilder::default();
        builder.push_row("123").push_row("45").push_row("678");

        assert_eq!(builder.is_valid(), Some(&vec![MalformedInput::RaggedRow { row: 1, expected: 3, found: 2 }]));
        assert_eq!(builder.build().unwrap_err(), Error::MalformedInput(MalformedInput::RaggedRow { row: 1, expected: 3, found: 2 }));
    }

    #[test]
    fn grid_rejects_non_digits() {
        let err = GridBuilder::default().push_row("1x3").build().unwrap_err();
        assert_eq!(err, Error::MalformedInput(MalformedInput::NotADigit { row: 0, col: 1, found: 'x' }));
    }

    #[test]
    fn grid_rejects_nothing() {
        assert_eq!(GridBuilder::default().build().unwrap_err(), Error::MalformedInput(MalformedInput::NoRows));
    }

    #[test]
    fn grid_rejects_empty_rows() {
        let err = GridBuilder::default().push_row("").build().unwrap_err();
        assert_eq!(err, Error::MalformedInput(MalformedInput::EmptyRow { row: 0 }));

        let err = GridBuilder::default().push_row("12").push_row("").build().unwrap_err();
        assert_eq!(err, Error::MalformedInput(MalformedInput::EmptyRow { row: 1 }));
    }

    #[test]
    fn grid_tiles_wrap_past_nine() {
        let tiled = grid("8", Adjacency::Orthogonal).tiled(NonZero::new(2).unwrap());
        assert_eq!(tiled.to_string(), "89\n91\n");
        assert_eq!(tiled.neighbors(Location(1, 1)).len(), 2);
    }

    #[test]
    fn input_sections() {
        assert_eq!(input::sections("ab\ncd\n\n  ef \n"), vec![vec!["ab", "cd"], vec!["ef"]]);
        assert_eq!(input::lines("\n12\n34\n\n").unwrap(), vec!["12", "34"]);
        assert_eq!(input::lines("12\n\n34").unwrap_err(), MalformedInput::SectionCount { expected: 1, found: 2 });
        assert_eq!(
            Engine::default().run(Policy::FloodFill { reduction: RegionReduction::RiskSum }, "").unwrap_err(),
            Error::MalformedInput(MalformedInput::SectionCount { expected: 1, found: 0 })
        );
    }

    #[test]
    fn flood_fill_basins() {
        let heights = grid(HEIGHTS, Adjacency::Orthogonal);
        let map = flood_fill(&heights, |value| value == BARRIER);

        assert_eq!(format!("{}", map), "00###11111
0#222#1#11
#22222#3#1
22222#333#
#2###33333
");
        assert_eq!(map.regions().iter().map(|region| region.size()).collect_vec(), vec![3, 9, 14, 9]);
        assert_eq!(map.regions().iter().map(|region| region.minimum()).collect_vec(),
                   vec![Location(1, 0), Location(9, 0), Location(2, 2), Location(6, 4)]);
        assert_eq!(map.regions()[0].to_string(), "region 0: minimum 1,0 (value 1), size 3");
        assert_eq!(map.label(Location(2, 0)), None);
        assert_eq!(map.label(Location(9, 2)), Some(1));

        assert_eq!(risk_sum(map.regions()), 15);
        assert_eq!(largest_product(map.regions(), 3), 1134);
    }

    #[test]
    fn flood_fill_plateau_goes_to_first_floor() {
        // both 0s are floors; the level run of 1s drains first to the left one
        let heights = grid("01110", Adjacency::Orthogonal);
        let map = flood_fill(&heights, |value| value == BARRIER);

        assert_eq!(map.to_string(), "00001\n");
        assert_eq!(map.regions().iter().map(|region| region.size()).collect_vec(), vec![4, 1]);
    }

    #[test]
    fn flood_fill_does_not_cross_ridges() {
        let heights = grid("01210", Adjacency::Orthogonal);
        let map = flood_fill(&heights, |value| value == BARRIER);

        assert_eq!(map.to_string(), "00011\n");
    }

    #[test]
    fn flood_fill_wide_plateau() {
        // a 100 by 100 level patch draining into one lower corner
        let mut rows = vec!["5".repeat(100); 100];
        rows[99] = format!("{}4", "5".repeat(99));
        let heights = GridBuilder::default().push_lines(rows.iter().map(String::as_str)).build().unwrap();

        let started = Instant::now();
        let map = flood_fill(&heights, |value| value == BARRIER);
        assert!(started.elapsed() < Duration::from_secs(2), "flood fill took {:?}", started.elapsed());

        assert_eq!(map.regions().len(), 1);
        assert_eq!(map.regions()[0].minimum(), Location(99, 99));
        assert_eq!(map.regions()[0].size(), 10_000);
        assert_eq!(risk_sum(map.regions()), 5);
    }

    #[test]
    fn flood_fill_wide_plateau_is_its_own_floor() {
        let rows = vec!["3".repeat(100); 100];
        let heights = GridBuilder::default().push_lines(rows.iter().map(String::as_str)).build().unwrap();

        let started = Instant::now();
        let map = flood_fill(&heights, |value| value == BARRIER);
        assert!(started.elapsed() < Duration::from_secs(2), "flood fill took {:?}", started.elapsed());

        assert_eq!(map.regions().len(), 1);
        assert_eq!(map.regions()[0].minimum(), Location(0, 0));
        assert_eq!(map.labeled_count(), 10_000);
    }

    #[test]
    fn flood_fill_all_barriers() {
        let heights = grid("99\n99", Adjacency::Orthogonal);
        let map = flood_fill(&heights, |value| value == BARRIER);

        assert!(map.regions().is_empty());
        assert_eq!(risk_sum(map.regions()), 0);
        assert_eq!(largest_product(map.regions(), 3), 1);
    }

    #[test]
    fn engine_flood_fill() {
        assert_eq!(answer(Policy::FloodFill { reduction: RegionReduction::RiskSum }, HEIGHTS), Some(15));
        assert_eq!(answer(Policy::FloodFill { reduction: RegionReduction::LargestProduct }, HEIGHTS), Some(1134));
    }

    #[test]
    fn automaton_cascade() {
        let mut automaton = Automaton::new(grid("11111
19991
19191
19991
11111", Adjacency::Diagonal));

        assert_eq!(automaton.tick(), 9);
        assert_eq!(format!("{}", automaton.grid()), "34543
40004
50005
40004
34543
");

        assert_eq!(automaton.tick(), 0);
        assert_eq!(format!("{}", automaton.grid()), "45654
51115
61116
51115
45654
");
        assert_eq!(automaton.ticks(), 2);
        assert_eq!(automaton.triggers(), 9);
    }

    #[test]
    fn automaton_zero_ticks() {
        let mut automaton = Automaton::new(grid(ENERGIES, Adjacency::Diagonal));
        assert_eq!(automaton.run_ticks(0, |_| {}), 0);
        assert_eq!(automaton.grid().to_string(), ENERGIES);
    }

    #[test]
    fn automaton_all_nines_synchronize_at_once() {
        let mut automaton = Automaton::new(grid("999\n999\n999", Adjacency::Diagonal));
        assert_eq!(automaton.tick(), 9);
        assert_eq!(automaton.grid().to_string(), "000\n000\n000\n");

        let mut automaton = Automaton::new(grid("999\n999\n999", Adjacency::Diagonal));
        assert_eq!(automaton.run_until_synchronized(10, |_| {}), Ok(1));
    }

    #[test]
    fn automaton_counts_and_synchronizes() {
        let mut automaton = Automaton::new(grid(ENERGIES, Adjacency::Diagonal));
        assert_eq!(automaton.run_ticks(10, |_| {}), 204);
        assert_eq!(automaton.run_ticks(90, |_| {}), 1656 - 204);
        assert_eq!(automaton.triggers(), 1656);

        assert_eq!(answer(Policy::AutomatonStep { termination: Termination::Ticks(100) }, ENERGIES), Some(1656));
        assert_eq!(answer(Policy::AutomatonStep { termination: Termination::UntilSynchronized }, ENERGIES), Some(195));
    }

    #[test]
    fn automaton_gives_up_at_ceiling() {
        let engine = Engine::new(Config { tick_ceiling: 100, ..Default::default() });
        assert_eq!(
            engine.run(Policy::AutomatonStep { termination: Termination::UntilSynchronized }, ENERGIES).unwrap_err(),
            Error::NoSynchronization { ticks: 100 }
        );
    }

    #[test]
    fn cave_graph_is_symmetric_and_deduplicated() {
        let graph = caves("start-A\nA-b\nb-A\nA-end\nb-end");
        assert_eq!(graph.cave_count(), 4);
        assert_eq!(graph.link_count(), 4);

        let a = graph.index_of("A").unwrap();
        let b = graph.index_of("b").unwrap();
        assert!(graph.links(a).contains(&b));
        assert!(graph.links(b).contains(&a));
        assert_eq!(graph.cave(b).name(), "b");
        assert_eq!(format!("{}", graph), "start: A
A: start,b,end
b: A,end
end: A,b
");
    }

    #[test]
    fn cave_graph_requires_terminals() {
        let err = CaveGraphBuilder::default().push_lines(["start-A", "A-b"]).build().unwrap_err();
        assert_eq!(err, Error::MissingTerminal("end"));

        let err = CaveGraphBuilder::default().push_lines(["A-end"]).build().unwrap_err();
        assert_eq!(err, Error::MissingTerminal("start"));
    }

    #[test]
    fn cave_graph_rejects_bad_links() {
        let mut builder = CaveGraphBuilder::default();
        builder.push_line("start-A-b").push_line("A-end");

        assert_eq!(builder.is_valid(), Some(&vec![MalformedInput::BadEdge { line: "start-A-b".to_string() }]));
        assert!(matches!(builder.build(), Err(Error::MalformedInput(MalformedInput::BadEdge { .. }))));
    }

    #[test]
    fn paths_at_most_once() {
        let graph = caves("start-A\nA-b\nb-A\nA-end\nb-end");
        let paths = enumerate_paths(&graph, VisitBudget::AtMostOnce, 1000).unwrap();

        assert_eq!(paths.iter().map(|path| graph.render(path)).collect_vec(), vec![
            "start,A,b,A,end",
            "start,A,b,end",
            "start,A,end",
        ]);
    }

    #[test]
    fn paths_one_double_visit() {
        let graph = caves("start-A\nA-b\nb-A\nA-end\nb-end");
        let paths = enumerate_paths(&graph, VisitBudget::OneDoubleVisit, 1000).unwrap();

        assert_eq!(paths.iter().map(|path| graph.render(path)).sorted().collect_vec(), vec![
            "start,A,b,A,b,A,end",
            "start,A,b,A,b,end",
            "start,A,b,A,end",
            "start,A,b,end",
            "start,A,end",
        ]);
    }

    #[test]
    fn paths_small_example() {
        let graph = caves(SMALL_CAVES);
        let paths = enumerate_paths(&graph, VisitBudget::AtMostOnce, 1000).unwrap();

        assert_eq!(paths.iter().map(|path| graph.render(path)).sorted().collect_vec(), vec![
            "start,A,b,A,c,A,end",
            "start,A,b,A,end",
            "start,A,b,end",
            "start,A,c,A,b,A,end",
            "start,A,c,A,b,end",
            "start,A,c,A,end",
            "start,A,end",
            "start,b,A,c,A,end",
            "start,b,A,end",
            "start,b,end",
        ]);
        assert!(paths.iter().all(|path| path.caves().first() == Some(&graph.start()) && path.caves().last() == Some(&graph.end())));
    }

    #[test]
    fn engine_paths() {
        let at_most_once = Policy::ConstrainedPathEnumeration { budget: VisitBudget::AtMostOnce };
        let one_double = Policy::ConstrainedPathEnumeration { budget: VisitBudget::OneDoubleVisit };

        assert_eq!(answer(at_most_once, SMALL_CAVES), Some(10));
        assert_eq!(answer(one_double, SMALL_CAVES), Some(36));
        assert_eq!(answer(at_most_once, MEDIUM_CAVES), Some(19));
        assert_eq!(answer(one_double, MEDIUM_CAVES), Some(103));
    }

    #[test]
    fn paths_unreachable_end() {
        let report = Engine::default()
            .run(Policy::ConstrainedPathEnumeration { budget: VisitBudget::OneDoubleVisit }, "start-a\nb-end")
            .unwrap();
        assert_eq!(report.answer().to_string(), "Number of paths: 0");
    }

    #[test]
    fn paths_unrestricted() {
        let graph = caves("start-a\na-end\nstart-end");
        assert_eq!(enumerate_paths(&graph, VisitBudget::Unrestricted, 1000).unwrap().len(), 2);

        // a and c can bounce back and forth forever
        let graph = caves("start-a\na-c\na-end");
        assert_eq!(enumerate_paths(&graph, VisitBudget::Unrestricted, 1000).unwrap_err(), Error::IterationLimitExceeded { limit: 1000 });
    }

    #[test]
    fn paths_ceiling() {
        let engine = Engine::new(Config { enumeration_ceiling: 10, ..Default::default() });
        assert_eq!(
            engine.run(Policy::ConstrainedPathEnumeration { budget: VisitBudget::OneDoubleVisit }, SMALL_CAVES).unwrap_err(),
            Error::IterationLimitExceeded { limit: 10 }
        );
    }

    #[test]
    fn shortest_path_costs() {
        let costs = grid(COSTS, Adjacency::Orthogonal);
        assert_eq!(shortest_path(&costs), Some(40));
        assert!(perimeter_bound(&costs) >= 40);

        assert_eq!(answer(Policy::ShortestPath { tiles: NonZero::new(1).unwrap() }, COSTS), Some(40));
        assert_eq!(answer(Policy::ShortestPath { tiles: NonZero::new(5).unwrap() }, COSTS), Some(315));
    }

    #[test]
    fn shortest_path_single_cell() {
        let costs = grid("7", Adjacency::Orthogonal);
        assert_eq!(perimeter_bound(&costs), 0);
        assert_eq!(shortest_path(&costs), Some(0));
    }

    #[test]
    fn shortest_path_takes_detours() {
        let costs = grid("19111
11191
99991
11111", Adjacency::Orthogonal);
        // both border routes cost 15; winding back up around the 9s costs 9
        assert_eq!(perimeter_bound(&costs), 15);
        assert_eq!(shortest_path(&costs), Some(9));
    }

    #[test]
    fn snapshots_do_not_change_answers() {
        let quiet = Engine::default();
        let chatty = Engine::new(Config { show_intermediate: true, ..Default::default() });

        for (policy, text) in [
            (Policy::FloodFill { reduction: RegionReduction::LargestProduct }, HEIGHTS),
            (Policy::AutomatonStep { termination: Termination::Ticks(10) }, ENERGIES),
            (Policy::ConstrainedPathEnumeration { budget: VisitBudget::OneDoubleVisit }, SMALL_CAVES),
            (Policy::ShortestPath { tiles: NonZero::new(2).unwrap() }, COSTS),
        ] {
            let quiet_report = quiet.run(policy, text).unwrap();
            let chatty_report = chatty.run(policy, text).unwrap();

            assert_eq!(quiet_report.answer(), chatty_report.answer());
            assert!(quiet_report.snapshots().is_empty());
            assert!(!chatty_report.snapshots().is_empty());
        }

        let report = chatty.run(Policy::AutomatonStep { termination: Termination::Ticks(2) }, ENERGIES).unwrap();
        assert_eq!(report.snapshots().len(), 3);
        assert_eq!(report.snapshots()[0], ENERGIES);
        assert!(report.snapshots()[2].starts_with("after tick 2:\n"));
    }

    #[test]
    fn adjacency_override() {
        let engine = Engine::new(Config { adjacency: Some(Adjacency::Orthogonal), ..Default::default() });
        let report = engine.run(Policy::AutomatonStep { termination: Termination::Ticks(1) }, "11111
19991
19191
19991
11111").unwrap();

        // with four neighbors the ring of 9s only lifts the center to 6
        assert_eq!(report.answer().value(), Some(8));
        assert_eq!("orthogonal".parse::<Adjacency>().unwrap(), Adjacency::Orthogonal);
        assert_eq!(VisitBudget::OneDoubleVisit.to_string(), "one-double-visit");
    }
}

#[cfg(test)]
mod properties {
    use itertools::Itertools;
    use proptest::prelude::*;

    use crate::builder::{Builder, CaveGraphBuilder, GridBuilder};
    use crate::flood::{flood_fill, BARRIER};
    use crate::paths::{enumerate_paths, VisitBudget};
    use crate::shape::{Adjacency, SquareStep};
    use crate::shortest::shortest_path;
    use crate::Location;

    fn arb_rows() -> impl Strategy<Value=Vec<String>> {
        (1usize..8, 1usize..8).prop_flat_map(|(width, breadth)| {
            prop::collection::vec(prop::collection::vec(0u32..10, width), breadth)
                .prop_map(|rows| rows.into_iter().map(|row| row.into_iter().map(|value| value.to_string()).join("")).collect_vec())
        })
    }

    fn arb_links() -> impl Strategy<Value=Vec<(usize, usize)>> {
        prop::collection::vec((0usize..CAVES.len(), 0usize..CAVES.len()), 0..12)
    }

    // lowercase names first so links between two large caves are easy to exclude
    const CAVES: [&str; 7] = ["start", "end", "a", "b", "c", "X", "Y"];

    proptest! {
        #[test]
        fn flood_fill_partitions(rows in arb_rows(), adjacency in prop::sample::select(vec![Adjacency::Orthogonal, Adjacency::Diagonal])) {
            let grid = GridBuilder::with_adjacency(adjacency).push_lines(rows.iter().map(String::as_str)).build().unwrap();
            let map = flood_fill(&grid, |value| value == BARRIER);

            let barriers = grid.locations().filter(|location| grid.value(*location) == Some(BARRIER)).count();
            prop_assert_eq!(map.labeled_count() + barriers, grid.width() * grid.breadth());
            prop_assert_eq!(map.regions().iter().map(|region| region.size()).sum::<usize>(), map.labeled_count());

            for region in map.regions() {
                let members = grid.locations().filter(|location| map.label(*location) == Some(region.id())).count();
                prop_assert_eq!(members, region.size());
                prop_assert_eq!(map.label(region.minimum()), Some(region.id()));
            }
        }

        #[test]
        fn grid_text_round_trips(rows in arb_rows()) {
            let grid = GridBuilder::default().push_lines(rows.iter().map(String::as_str)).build().unwrap();
            prop_assert_eq!(grid.to_string(), rows.iter().map(|row| format!("{}\n", row)).join(""));
        }

        #[test]
        fn uniform_costs_are_manhattan(n in 1usize..16) {
            let row = "1".repeat(n);
            let grid = GridBuilder::default().push_lines(std::iter::repeat(row.as_str()).take(n)).build().unwrap();
            prop_assert_eq!(shortest_path(&grid), Some(2 * n as u64 - 2));
        }

        #[test]
        fn double_visit_never_loses_paths(links in arb_links()) {
            let mut builder = CaveGraphBuilder::default();
            builder.add_link("start", "a").add_link("a", "end");
            for (i, j) in links {
                // two large caves side by side would allow endless paths
                if i != j && (i < 5 || j < 5) {
                    builder.add_link(CAVES[i], CAVES[j]);
                }
            }
            let graph = builder.build().unwrap();

            let once = enumerate_paths(&graph, VisitBudget::AtMostOnce, 10_000_000).unwrap();
            let twice = enumerate_paths(&graph, VisitBudget::OneDoubleVisit, 10_000_000).unwrap();
            prop_assert!(twice.len() >= once.len());
            for path in &once {
                prop_assert!(twice.contains(path));
            }
        }
    }

    #[test]
    fn square_steps_stay_adjacent() {
        use strum::VariantArray;

        use crate::shape::Step;

        for step in SquareStep::VARIANTS {
            let there = step.attempt_from(Location(5, 5));
            assert_eq!(there.0.abs_diff(5) + there.1.abs_diff(5), 1);
        }
    }
}
