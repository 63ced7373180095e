//! Tests for pagination module

use super::*;

/// Drive a cursor over a sequence of page sizes the way the sync loop does,
/// returning the pages that were requested.
fn drive(pages: &[usize]) -> (Vec<u32>, PageCursor) {
    let mut cursor = PageCursor::new();
    let mut requested = Vec::new();

    for &count in pages {
        requested.push(cursor.page());
        if cursor.advance(count).is_none() {
            break;
        }
    }

    (requested, cursor)
}

// ============================================================================
// PageToken Tests
// ============================================================================

#[test]
fn test_page_token_basics() {
    assert_eq!(PageToken::FIRST.get(), 1);
    assert_eq!(PageToken::default(), PageToken::FIRST);
    assert_eq!(PageToken::new(0), PageToken::FIRST);
    assert_eq!(PageToken::new(7).next().get(), 8);
    assert_eq!(PageToken::new(3).to_string(), "3");
    assert_eq!(u32::from(PageToken::new(4)), 4);
}

#[test]
fn test_page_token_saturates() {
    assert_eq!(PageToken::new(u32::MAX).next().get(), u32::MAX);
}

// ============================================================================
// next_token Tests
// ============================================================================

#[test]
fn test_next_token_after_implicit_first_page() {
    assert_eq!(next_token(None, 250), Some(PageToken::new(2)));
}

#[test]
fn test_next_token_increments() {
    assert_eq!(next_token(Some(PageToken::new(2)), 250), Some(PageToken::new(3)));
    assert_eq!(next_token(Some(PageToken::new(9)), 1), Some(PageToken::new(10)));
}

#[test]
fn test_next_token_stops_on_empty_page() {
    assert_eq!(next_token(Some(PageToken::new(3)), 0), None);
    assert_eq!(next_token(None, 0), None);
}

#[test]
fn test_next_token_is_pure() {
    for _ in 0..3 {
        assert_eq!(next_token(Some(PageToken::new(5)), 10), Some(PageToken::new(6)));
    }
}

// ============================================================================
// PageCursor Tests
// ============================================================================

#[test]
fn test_page_cursor_default() {
    let cursor = PageCursor::new();
    assert!(cursor.token().is_none());
    assert_eq!(cursor.page(), 1);
    assert_eq!(cursor.pages_fetched(), 0);
    assert_eq!(cursor.records_fetched(), 0);
    assert!(!cursor.is_done());
}

#[test]
fn test_three_page_scenario() {
    let mut cursor = PageCursor::new();

    assert_eq!(cursor.token(), None);
    assert_eq!(cursor.advance(250), Some(PageToken::new(2)));
    assert_eq!(cursor.advance(250), Some(PageToken::new(3)));
    assert_eq!(cursor.advance(0), None);

    assert!(cursor.is_done());
    assert_eq!(cursor.pages_fetched(), 3);
    assert_eq!(cursor.records_fetched(), 500);
}

#[test]
fn test_terminal_is_sticky() {
    let mut cursor = PageCursor::new();
    assert_eq!(cursor.advance(0), None);
    assert!(cursor.is_done());

    // A stray call after termination must not restart pagination
    assert_eq!(cursor.advance(250), None);
    assert_eq!(cursor.pages_fetched(), 1);
    assert_eq!(cursor.records_fetched(), 0);
}

#[test]
fn test_requests_stop_at_first_empty_page() {
    let cases: [&[usize]; 5] = [
        &[0],
        &[1, 0],
        &[250, 250, 0],
        &[250, 13, 7, 1, 0],
        &[5, 5, 5, 5, 5, 5, 5, 5, 0],
    ];

    for pages in cases {
        let non_empty = pages.len() - 1;
        // Pages after the terminating one must never be requested
        let mut extended = pages.to_vec();
        extended.extend([99, 99]);

        let (requested, cursor) = drive(&extended);

        assert_eq!(requested.len(), non_empty + 1, "pages: {pages:?}");
        assert_eq!(requested, (1..=non_empty as u32 + 1).collect::<Vec<_>>());
        assert!(cursor.is_done());
        assert_eq!(
            cursor.records_fetched(),
            pages.iter().sum::<usize>() as u64
        );
    }
}

#[test]
fn test_tokens_strictly_increase() {
    let mut cursor = PageCursor::new();
    let mut last = 1;
    for _ in 0..50 {
        let token = cursor.advance(10).unwrap();
        assert!(token.get() > last);
        last = token.get();
    }
    assert_eq!(cursor.page(), 51);
}
