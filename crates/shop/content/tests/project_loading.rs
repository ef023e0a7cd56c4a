use std::fs;
use std::path::Path;

use shop_content::ContentFactory;
use shop_core::{
    ActorId, CostLine, CostResolver, EntryId, EntryKey, EntryKind, MemoryStore, PluginCommand,
    RuntimeOracle, SkillShop, purchase,
};
use tempfile::TempDir;

const SKILLS: &str = r#"[
null,
{"id":1,"name":"Fire","note":"Burns.\n<buy cost gold: 250>\n<buy cost weapon 3: 2>\n<buy cost item 7: 1>","mpCost":5},
{"id":2,"name":"Ice","note":"<buy cost item 9999: 1>"},
{"id":3,"name":"Bolt","note":"<buy require switch 5: True>\r\n<buy require variable 4: 10>\r\n<buy cost variable 2: 3>"},
{"id":4,"name":"Plain","note":""}
]"#;

const ITEMS: &str = r#"[
null,
{"id":1,"name":"Guild Card","note":"Opens the guild shop.\n<shop skills: 1, 2, 3, 4>"},
{"id":7,"name":"Ether","note":""}
]"#;

const WEAPONS: &str = r#"[null,{"id":3,"name":"Longsword","note":""}]"#;

const STATES: &str = r#"[
null,
{"id":1,"name":"Knockout","note":""},
{"id":2,"name":"Blessing","note":"<RETAIN ON DEATH>"}
]"#;

const PLUGINS: &str = r#"var $plugins =
[
{"name":"YED_SkillShop","status":true,"description":"","parameters":{"Default Price":"80","Requirements Text":"Costs"}}
];
"#;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(&root.join("data/Skills.json"), SKILLS);
    write(&root.join("data/Items.json"), ITEMS);
    write(&root.join("data/Weapons.json"), WEAPONS);
    write(&root.join("data/States.json"), STATES);
    write(&root.join("js/plugins.js"), PLUGINS);
    dir
}

#[test]
fn loads_project_and_builds_registry() {
    let dir = project();
    let content = ContentFactory::new(dir.path()).load().unwrap();
    let registry = &content.registry;

    assert_eq!(registry.config().default_price, 80);
    assert_eq!(registry.config().requirements_text, "Costs");
    assert_eq!(registry.count(EntryKind::Skill), 4);
    assert_eq!(registry.count(EntryKind::Armor), 0);

    assert_eq!(registry.cost(EntryKey::skill(1)).unwrap().gold_cost, 250);
    assert_eq!(registry.cost(EntryKey::skill(4)).unwrap().gold_cost, 80);
    assert!(registry.retains_on_death(EntryKey::state(2)));
    assert_eq!(
        registry.states_cleared_on_death(&[EntryId(1), EntryId(2)]),
        vec![EntryId(1)]
    );
}

#[test]
fn toml_override_takes_precedence() {
    let dir = project();
    write(&dir.path().join("shop.toml"), "default_price = 5\n");
    let config = ContentFactory::new(dir.path()).load_config().unwrap();
    assert_eq!(config.default_price, 5);
    assert_eq!(config.requirements_text, "Requirements");
}

#[test]
fn missing_plugin_list_uses_defaults() {
    let dir = project();
    fs::remove_file(dir.path().join("js/plugins.js")).unwrap();
    let config = ContentFactory::new(dir.path()).load_config().unwrap();
    assert_eq!(config.default_price, 100);
}

#[test]
fn malformed_table_is_an_error() {
    let dir = project();
    write(&dir.path().join("data/Skills.json"), "[null, {");
    assert!(ContentFactory::new(dir.path()).load().is_err());
}

#[test]
fn resolves_costs_from_loaded_project() {
    let dir = project();
    let content = ContentFactory::new(dir.path()).load().unwrap();
    let store = MemoryStore::new();
    let resolver = CostResolver::new(&content.registry, &content.database, &store);

    let lines = resolver.buy_cost_items(EntryKey::skill(1)).unwrap();
    let names: Vec<_> = lines
        .iter()
        .map(|line| match line {
            CostLine::Resolved { entry, quantity, .. } => (entry.name.as_str(), *quantity),
            CostLine::Unresolved { .. } => ("?", 0),
        })
        .collect();
    assert_eq!(names, [("Longsword", 2), ("Ether", 1)]);

    let lines = resolver.buy_cost_items(EntryKey::skill(2)).unwrap();
    assert!(matches!(
        lines[0],
        CostLine::Unresolved {
            id: EntryId(9999),
            quantity: 1,
            ..
        }
    ));
}

#[test]
fn open_skill_shop_and_buy() {
    let dir = project();
    let content = ContentFactory::new(dir.path()).load().unwrap();
    let command: PluginCommand = "OpenSkillShop 1".parse().unwrap();
    let shop = SkillShop::from_command(command, &content.registry, &content.database).unwrap();
    assert_eq!(
        shop.skills,
        vec![EntryId(1), EntryId(2), EntryId(3), EntryId(4)]
    );
    assert_eq!(shop.requirements_text, "Costs");

    let mut store = MemoryStore::new()
        .with_gold(300)
        .with_switch(5, true)
        .with_variable(4, 12)
        .with_variable(2, 3);

    {
        let resolver = CostResolver::new(&content.registry, &content.database, &store);
        let listings = shop.listings(&resolver);
        let buyable: Vec<_> = listings
            .iter()
            .filter(|listing| listing.check.can_buy())
            .map(|listing| listing.skill.name.as_str())
            .collect();
        assert_eq!(buyable, ["Bolt", "Plain"]);
    }

    let hero = ActorId(1);
    purchase(
        &content.registry,
        &content.database,
        &mut store,
        hero,
        EntryId(3),
    )
    .unwrap();
    assert_eq!(store.gold(), 220);
    assert_eq!(store.variable(2), 0);
    assert!(store.knows_skill(hero, EntryId(3)));
}
