use hashgraph_gossip_sim::utils::{calculate_threshold, has_quorum, select_median};

#[test]
fn test_two_thirds_plus_one_threshold() {
    // Empty network: no threshold at all
    assert_eq!(calculate_threshold(0), None);

    // 1 participant: floor(2/3) + 1 = 1
    assert_eq!(calculate_threshold(1), Some(1));

    // 2 participants: floor(4/3) + 1 = 2
    assert_eq!(calculate_threshold(2), Some(2));

    // 3 participants: floor(6/3) + 1 = 3
    assert_eq!(calculate_threshold(3), Some(3));

    // 4 participants: floor(8/3) + 1 = 3
    assert_eq!(calculate_threshold(4), Some(3));

    // 7 participants: floor(14/3) + 1 = 5
    assert_eq!(calculate_threshold(7), Some(5));

    // 100 participants: floor(200/3) + 1 = 67
    assert_eq!(calculate_threshold(100), Some(67));
}

#[test]
fn test_quorum_checks() {
    assert!(!has_quorum(5, 0));
    assert!(has_quorum(1, 1));
    assert!(!has_quorum(2, 4));
    assert!(has_quorum(3, 4));
    assert!(has_quorum(4, 4));
    assert!(!has_quorum(66, 100));
    assert!(has_quorum(67, 100));
}

#[test]
fn test_median_takes_lower_middle_for_even_counts() {
    assert_eq!(select_median(vec![5, 1, 9, 3]), Some(3));
    assert_eq!(select_median(vec![10, 20]), Some(10));
    assert_eq!(select_median(vec![4, 4, 4, 4]), Some(4));
    assert_eq!(select_median(vec![7, 3, 5, 1, 9]), Some(5));
    assert_eq!(select_median(Vec::new()), None);
}
