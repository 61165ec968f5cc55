//! Property coverage for the string value's universal invariants.

use quickcheck_macros::quickcheck;
use strand_str::ByteStr;

#[quickcheck]
fn len_never_exceeds_capacity(data: Vec<u8>, extra: u8) -> bool {
    let mut s = ByteStr::from_bytes(&data).unwrap();
    s.reserve(extra as usize).unwrap();
    s.len() <= s.capacity()
}

#[quickcheck]
fn duplicate_is_equal_with_distinct_buffer(data: Vec<u8>) -> bool {
    let s = ByteStr::from_bytes(&data).unwrap();
    let t = s.try_clone().unwrap();
    let same_bytes = s == t && s.hash64() == t.hash64();
    let distinct = data.is_empty() || s.as_slice().as_ptr() != t.as_slice().as_ptr();
    same_bytes && distinct
}

#[quickcheck]
fn span_partition_law(data: Vec<u8>, set: Vec<u8>) -> bool {
    let s = ByteStr::from_bytes(&data).unwrap();
    let spn = s.span_byteset(&set);
    let cspn = s.span_not_byteset(&set);
    spn + cspn <= s.len()
}

#[quickcheck]
fn concat_is_associative(a: Vec<u8>, b: Vec<u8>, c: Vec<u8>) -> bool {
    let mut left = ByteStr::from_bytes(&a).unwrap();
    left.append(&b).unwrap();
    left.append(&c).unwrap();

    let mut bc = ByteStr::from_bytes(&b).unwrap();
    bc.append(&c).unwrap();
    let mut right = ByteStr::from_bytes(&a).unwrap();
    right.append(bc.as_slice()).unwrap();

    left == right
}

#[quickcheck]
fn self_replacement_is_identity(data: Vec<u8>, needle: Vec<u8>) -> bool {
    if needle.is_empty() {
        return true;
    }
    let mut s = ByteStr::from_bytes(&data).unwrap();
    let before = s.to_vec();
    s.replace(&needle, &needle, 0).unwrap();
    s.as_slice() == &before[..]
}

#[quickcheck]
fn compare_agrees_with_slice_ordering(a: Vec<u8>, b: Vec<u8>) -> bool {
    let sa = ByteStr::from_bytes(&a).unwrap();
    let sign = sa.compare(&b);
    match a.cmp(&b) {
        std::cmp::Ordering::Less => sign < 0,
        std::cmp::Ordering::Equal => sign == 0,
        std::cmp::Ordering::Greater => sign > 0,
    }
}

#[quickcheck]
fn find_agrees_with_windows_scan(data: Vec<u8>, needle: Vec<u8>) -> bool {
    let s = ByteStr::from_bytes(&data).unwrap();
    let expect = if needle.is_empty() {
        Some(0)
    } else if needle.len() > data.len() {
        None
    } else {
        data.windows(needle.len()).position(|w| w == &needle[..])
    };
    s.find(&needle) == expect
}

#[quickcheck]
fn edit_distance_triangle_zero(a: Vec<u8>) -> bool {
    strand_str::edit_distance(&a, &a) == 0
}
