use recruit_finder::recruit::{filter_operators, Item, Rarity, Roster, Selection};

fn sample_roster() -> Roster {
    Roster::from_json_str(include_str!("../../../data/roster.json")).expect("sample roster loads")
}

fn ids(operators: &[recruit_finder::recruit::Operator]) -> Vec<u32> {
    operators.iter().map(|operator| operator.id).collect()
}

#[test]
fn sample_roster_loads_cleanly() {
    let roster = sample_roster();
    assert_eq!(roster.len(), 53);
    assert!(roster.issues().is_empty(), "{:?}", roster.issues());

    let lancet = roster.get(1).expect("legacy record kept");
    assert!(lancet.is_robot());
    assert!(!lancet.tags.is_empty());
}

#[test]
fn senior_elite_selection_surfaces_six_stars_first() {
    let roster = sample_roster();
    let selection = Selection::parse(&["上級エリート", "狙撃"], 6).expect("valid selection");

    let result = filter_operators(roster.operators(), &selection);

    assert_eq!(
        result.keys(),
        vec!["SeniorElite + sniper", "SeniorElite", "sniper"]
    );
    assert_eq!(ids(result.get("SeniorElite + sniper").expect("pair")), vec![51]);
    assert_eq!(
        ids(result.get("SeniorElite").expect("alias group")),
        vec![50, 53, 51, 52]
    );
    assert_eq!(
        ids(result.get("sniper").expect("sniper group")),
        vec![6, 18, 19, 20, 32, 33, 44]
    );
}

#[test]
fn keys_only_use_selected_items_and_six_stars_need_the_alias() {
    let roster = sample_roster();
    let selection =
        Selection::parse(&["defense", "healing", "defender", "Elite", "melee"], 6)
            .expect("valid selection");
    let selected: Vec<&str> = selection.items().iter().map(|item| item.label()).collect();

    let result = filter_operators(roster.operators(), &selection);

    assert!(!result.is_empty());
    for group in result.groups() {
        assert!(group
            .key()
            .split(" + ")
            .all(|label| selected.contains(&label)));
        assert!(group
            .operators
            .iter()
            .all(|operator| operator.rarity != Rarity::SIX));
        assert!(group
            .operators
            .windows(2)
            .all(|pair| pair[0].display_order() <= pair[1].display_order()));
    }

    let elite_groups = result
        .groups()
        .iter()
        .take_while(|group| group.combination.contains(Item::parse("Elite").expect("alias")))
        .count();
    assert!(elite_groups > 0);
    assert!(result.groups()[elite_groups..]
        .windows(2)
        .all(|pair| pair[0].combination.len() >= pair[1].combination.len()));
}

#[test]
fn robot_alias_finds_rarity_one_operators() {
    let roster = sample_roster();
    let selection = Selection::parse(&["ロボット"], 6).expect("valid selection");

    let result = filter_operators(roster.operators(), &selection);

    assert_eq!(ids(result.get("Robot").expect("robot group")), vec![2, 1, 3]);
}

#[test]
fn identical_inputs_produce_identical_output() {
    let roster = sample_roster();
    let selection =
        Selection::parse(&["dps", "survival", "guard", "specialist"], 6).expect("valid selection");

    let first = filter_operators(roster.operators(), &selection);
    let second = filter_operators(roster.operators(), &selection);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("json"),
        serde_json::to_string(&second).expect("json")
    );
}
