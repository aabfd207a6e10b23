use super::domain::{Item, Operator, Rarity, RarityAlias};

/// Whether a single item holds for the operator, ignoring the senior-elite gate.
pub fn matches(operator: &Operator, item: Item) -> bool {
    match item {
        Item::Type(operator_type) => operator.operator_type == Some(operator_type),
        Item::Tag(_) | Item::Position(_) => operator.has_trait(item),
        Item::Alias(alias) => operator.rarity == alias.rarity(),
    }
}

/// All items hold and, for a 6★ operator, the combination names `SeniorElite`.
pub fn satisfies_combination(operator: &Operator, combination: &[Item]) -> bool {
    if operator.rarity == Rarity::SIX
        && !combination.contains(&Item::Alias(RarityAlias::SeniorElite))
    {
        return false;
    }

    combination.iter().all(|item| matches(operator, *item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recruit::domain::{OperatorType, Position, Qualification, TraitSet};

    fn operator(rarity: u8, operator_type: Option<OperatorType>, tags: &[Item]) -> Operator {
        Operator {
            id: 1,
            name: "test".to_string(),
            rarity: Rarity::try_from(rarity).expect("valid rarity"),
            operator_type,
            tags: tags.iter().copied().collect::<TraitSet>(),
            added_on: None,
            wiki: String::new(),
            img_path: String::new(),
        }
    }

    const CASTER: Item = Item::Type(OperatorType::Caster);
    const BURST: Item = Item::Tag(Qualification::Burst);
    const ELITE: Item = Item::Alias(RarityAlias::Elite);
    const SENIOR: Item = Item::Alias(RarityAlias::SeniorElite);
    const ROBOT: Item = Item::Alias(RarityAlias::Robot);

    #[test]
    fn type_and_tag_items_match_stored_attributes() {
        let caster = operator(4, Some(OperatorType::Caster), &[BURST]);
        assert!(matches(&caster, CASTER));
        assert!(matches(&caster, BURST));
        assert!(!matches(&caster, Item::Type(OperatorType::Medic)));
        assert!(!matches(&caster, Item::Tag(Qualification::Healing)));
    }

    #[test]
    fn aliases_match_by_rarity_not_storage() {
        let five = operator(5, Some(OperatorType::Guard), &[]);
        assert!(matches(&five, ELITE));
        assert!(!matches(&five, SENIOR));
        assert!(!matches(&five, ROBOT));

        let six = operator(6, Some(OperatorType::Guard), &[]);
        assert!(matches(&six, SENIOR));
        assert!(!matches(&six, ELITE));

        let robot = operator(1, Some(OperatorType::Medic), &[]);
        assert!(matches(&robot, ROBOT));

        let tagged_but_rare = operator(4, Some(OperatorType::Medic), &[ROBOT]);
        assert!(!matches(&tagged_but_rare, ROBOT));
    }

    #[test]
    fn positions_match_by_membership() {
        let melee = operator(3, Some(OperatorType::Guard), &[Item::Position(Position::Melee)]);
        assert!(matches(&melee, Item::Position(Position::Melee)));
        assert!(!matches(&melee, Item::Position(Position::Ranged)));
    }

    #[test]
    fn senior_elite_gate_blocks_six_star_without_alias() {
        let six = operator(6, Some(OperatorType::Sniper), &[]);
        let sniper = Item::Type(OperatorType::Sniper);

        assert!(!satisfies_combination(&six, &[sniper]));
        assert!(satisfies_combination(&six, &[sniper, SENIOR]));
        assert!(satisfies_combination(&six, &[SENIOR]));
    }

    #[test]
    fn combination_requires_every_item() {
        let caster = operator(5, Some(OperatorType::Caster), &[BURST]);
        assert!(satisfies_combination(&caster, &[CASTER, BURST]));
        assert!(satisfies_combination(&caster, &[BURST, CASTER, ELITE]));
        assert!(!satisfies_combination(&caster, &[CASTER, SENIOR]));
    }

    #[test]
    fn untyped_operator_never_matches_a_type() {
        let untyped = operator(3, None, &[BURST]);
        assert!(!matches(&untyped, CASTER));
        assert!(matches(&untyped, BURST));
    }
}
