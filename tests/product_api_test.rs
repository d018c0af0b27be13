// ==========================================
// ProductApi 集成测试
// ==========================================
// 测试范围:
// 1. 商品登记: SKU 生成、库位规范化、校验
// 2. 数量调整 / 库位分配
// 3. 检索: 名称包含（大小写不敏感）、SKU 精确匹配、空输入
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use helpers::test_data_builder::{slot_grid, ProductBuilder};
use maur_wms::api::{ApiError, ProductApi};
use maur_wms::config::config_keys;
use maur_wms::engine::SearchOutcome;

fn skus(outcome: &SearchOutcome) -> Vec<String> {
    outcome.items().iter().map(|p| p.sku.clone()).collect()
}

// ==========================================
// 登记
// ==========================================

#[test]
fn test_register_product_正常登记() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_slots(&slot_grid(1, &['A'], 1, 1));

    let product = env
        .product_api
        .register_product("  Parafuso  ", "5", " 1-a-01-01 ", ACTOR)
        .unwrap();

    assert_eq!(product.sku.len(), 6);
    assert!(product.sku.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(product.name, "Parafuso");
    assert_eq!(product.quantity, 5);
    assert_eq!(product.slot_code.as_deref(), Some("1-A-01-01"));

    let stored = env.product_api.get_product(&product.sku).unwrap().unwrap();
    assert_eq!(stored, product);
    assert_eq!(
        env.action_log_repo.find_by_action_type("RegisterProduct").unwrap().len(),
        1
    );
}

#[test]
fn test_register_product_空库位为未分配() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let product = env
        .product_api
        .register_product("Porca", "0", "   ", ACTOR)
        .unwrap();
    assert_eq!(product.slot_code, None);
}

#[test]
fn test_register_product_未登记库位仍接受() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let product = env
        .product_api
        .register_product("Arruela", "3", "9-Z-99-99", ACTOR)
        .unwrap();
    assert_eq!(product.slot_code.as_deref(), Some("9-Z-99-99"));
    assert_eq!(env.product_count(), 1);
}

#[test]
fn test_register_product_校验失败不写入() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let cases = [
        ("Parafuso", "abc"),
        ("Parafuso", "-1"),
        ("Parafuso", ""),
        ("Parafuso", "2.5"),
        ("   ", "3"),
    ];
    for (name, qty) in cases {
        let err = env
            .product_api
            .register_product(name, qty, "1-A-01-01", ACTOR)
            .expect_err("应当校验失败");
        assert!(err.is_input_error(), "unexpected error: {:?}", err);
    }

    assert_eq!(env.product_count(), 0);
    assert_eq!(env.action_count(), 0);
}

#[test]
fn test_register_product_sku唯一() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let mut seen = std::collections::HashSet::new();
    for i in 0..50 {
        let p = env
            .product_api
            .register_product(&format!("Item {}", i), "1", "", ACTOR)
            .unwrap();
        assert!(seen.insert(p.sku));
    }
    assert_eq!(env.product_count(), 50);
}

// ==========================================
// 数量 / 库位
// ==========================================

#[test]
fn test_update_quantity() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_product(ProductBuilder::new("000123").quantity(5).build());

    let updated = env
        .product_api
        .update_quantity("000123", "12", ACTOR)
        .unwrap();
    assert_eq!(updated.quantity, 12);

    let logs = env.action_log_repo.find_by_action_type("UpdateQuantity").unwrap();
    assert_eq!(logs.len(), 1);
    let payload = logs[0].payload_json.as_ref().unwrap();
    assert_eq!(payload["from"], 5);
    assert_eq!(payload["to"], 12);
}

#[test]
fn test_update_quantity_异常() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_product(ProductBuilder::new("000123").quantity(5).build());

    let result = env.product_api.update_quantity("999999", "1", ACTOR);
    assert!(matches!(result, Err(ApiError::NotFound(_))));

    let result = env.product_api.update_quantity("000123", "-4", ACTOR);
    assert!(matches!(result, Err(ApiError::ValidationError(_))));

    let stored = env.product_repo.find_by_sku("000123").unwrap().unwrap();
    assert_eq!(stored.quantity, 5);
}

#[test]
fn test_assign_slot() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_product(ProductBuilder::new("000123").slot("1-A-01-01").build());

    let moved = env
        .product_api
        .assign_slot("000123", "1-b-02-01", ACTOR)
        .unwrap();
    assert_eq!(moved.slot_code.as_deref(), Some("1-B-02-01"));

    let cleared = env.product_api.assign_slot("000123", "", ACTOR).unwrap();
    assert_eq!(cleared.slot_code, None);

    let result = env.product_api.assign_slot("000999", "1-A-01-01", ACTOR);
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

// ==========================================
// 检索
// ==========================================

fn seed_catalog(env: &ApiTestEnv) {
    env.seed_product(ProductBuilder::new("000123").name("Parafuso Sextavado").build());
    env.seed_product(ProductBuilder::new("004567").name("Porca").build());
    env.seed_product(ProductBuilder::new("000999").name("PARAFUSO de rosca").build());
}

#[test]
fn test_search_名称大小写不敏感() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    seed_catalog(&env);

    let outcome = env.product_api.search("parafuso").unwrap();
    assert_eq!(skus(&outcome), vec!["000123", "000999"]);

    let outcome = env.product_api.search("  PORCA ").unwrap();
    assert_eq!(skus(&outcome), vec!["004567"]);
}

#[test]
fn test_search_sku精确匹配() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    seed_catalog(&env);

    assert_eq!(skus(&env.product_api.search("004567").unwrap()), vec!["004567"]);
    assert!(env.product_api.search("0045").unwrap().items().is_empty());
}

#[test]
fn test_search_空输入() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    seed_catalog(&env);

    let outcome = env.product_api.search("   ").unwrap();
    assert_eq!(outcome, SearchOutcome::NoInput);
    assert!(ProductApi::search_hint(&outcome).is_some());

    let outcome = env.product_api.search("martelo").unwrap();
    assert_eq!(outcome, SearchOutcome::Matches(vec![]));
    assert!(ProductApi::search_hint(&outcome).is_none());
}

#[test]
fn test_search_结果上限() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    seed_catalog(&env);

    env.config_api
        .update_config(config_keys::SEARCH_MAX_RESULTS, "1", ACTOR)
        .unwrap();
    assert_eq!(skus(&env.product_api.search("parafuso").unwrap()), vec!["000123"]);
}
