use crate::nn::optimizer::{Optimizer, OptimizerKind};
use crate::train::TrainError;

#[test]
fn test_kind_parse_is_case_insensitive() {
    assert_eq!("sgd".parse::<OptimizerKind>().unwrap(), OptimizerKind::Sgd);
    assert_eq!("Adam".parse::<OptimizerKind>().unwrap(), OptimizerKind::Adam);
    assert_eq!("ADAMAX".parse::<OptimizerKind>().unwrap(), OptimizerKind::Adamax);
    assert_eq!("RMSProp".parse::<OptimizerKind>().unwrap(), OptimizerKind::RmsProp);
    assert_eq!(" adagrad ".parse::<OptimizerKind>().unwrap(), OptimizerKind::Adagrad);
}

#[test]
fn test_kind_rejects_names_outside_allow_list() {
    for name in ["lbfgs", "", "adamw", "sgd2"] {
        let err = name.parse::<OptimizerKind>().unwrap_err();
        match &err {
            TrainError::UnsupportedOptimizer { name: rejected, allowed } => {
                assert_eq!(rejected, name);
                assert_eq!(allowed, "sgd, adam, adamax, rmsprop, adagrad");
            }
            other => panic!("意外的错误类型：{other:?}"),
        }
        assert!(err.to_string().contains("rmsprop"));
    }
}

#[test]
fn test_kind_display_round_trips_through_parse() {
    for kind in OptimizerKind::ALL {
        assert_eq!(kind.to_string().parse::<OptimizerKind>().unwrap(), kind);
    }
}

#[test]
fn test_kind_serde_uses_lowercase_names() {
    assert_eq!(
        serde_json::to_string(&OptimizerKind::RmsProp).unwrap(),
        "\"rmsprop\""
    );
    let kind: OptimizerKind = serde_json::from_str("\"adamax\"").unwrap();
    assert_eq!(kind, OptimizerKind::Adamax);
    assert!(serde_json::from_str::<OptimizerKind>("\"momentum\"").is_err());
}

#[test]
fn test_kind_builds_matching_optimizer() {
    let names: Vec<&str> = OptimizerKind::ALL
        .iter()
        .map(|kind| kind.build(0.01).name())
        .collect();
    assert_eq!(names, ["SGD", "Adam", "Adamax", "RMSProp", "Adagrad"]);

    let optimizer = OptimizerKind::Adam.build(0.25);
    assert_eq!(optimizer.learning_rate(), 0.25);
    assert_eq!(OptimizerKind::default(), OptimizerKind::Sgd);
}
