use super::*;

#[test]
fn zero_group_size_is_invalid() {
    assert!(matches!(
        partition(&[1, 2, 3], 0),
        Err(StackError::InvalidArgument(_))
    ));
    assert!(group_count(3, 0).is_err());
}

#[test]
fn empty_input_yields_no_groups() {
    let empty: [u8; 0] = [];
    assert!(partition(&empty, 4).unwrap().is_empty());
    assert_eq!(group_count(0, 4).unwrap(), 0);
}

#[test]
fn last_group_holds_the_remainder() {
    let pages = (1..=10).collect::<Vec<_>>();
    let groups = partition(&pages, 4).unwrap();
    assert_eq!(
        groups,
        vec![&[1, 2, 3, 4][..], &[5, 6, 7, 8][..], &[9, 10][..]]
    );
    assert_eq!(group_count(pages.len(), 4).unwrap(), 3);
}

#[test]
fn exact_multiple_has_full_last_group() {
    let pages = (0..9).collect::<Vec<_>>();
    let groups = partition(&pages, 3).unwrap();
    assert_eq!(groups.len(), 3);
    assert!(groups.iter().all(|g| g.len() == 3));
}

#[test]
fn group_size_larger_than_input_is_one_group() {
    let pages = ["a", "b"];
    assert_eq!(partition(&pages, 9).unwrap(), vec![&pages[..]]);
}
