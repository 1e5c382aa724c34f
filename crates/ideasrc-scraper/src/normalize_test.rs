use serde_json::json;

use super::*;

fn story(id: u64, title: &str, url: Option<&str>) -> HnItem {
    HnItem {
        id,
        kind: Some("story".to_owned()),
        by: Some("pg".to_owned()),
        time: Some(1_175_714_200),
        title: Some(title.to_owned()),
        text: None,
        url: url.map(str::to_owned),
        score: Some(57),
        descendants: Some(15),
        kids: vec![],
        deleted: false,
        dead: false,
    }
}

// -----------------------------------------------------------------------
// item_to_record
// -----------------------------------------------------------------------

#[test]
fn story_becomes_record_with_domain_tag() {
    let item = story(8863, "My YC app: Dropbox", Some("https://www.getdropbox.com/u/2/x"));
    let raw = json!({"id": 8863});
    let record = item_to_record(&item, HnFeed::Top, raw.clone()).expect("record");

    assert_eq!(record.source, "hackernews_frontpage");
    assert_eq!(record.source_id, "8863");
    assert_eq!(record.title, "My YC app: Dropbox");
    assert_eq!(record.tags, vec!["story", "frontpage", "getdropbox.com"]);
    assert!(record.description.is_none());
    assert_eq!(record.raw, raw);
}

#[test]
fn ask_post_keeps_text_and_gets_label() {
    let mut item = story(121_003, "Ask HN: The Arc Effect", None);
    item.text = Some("<i>or</i> HN: the Next Iteration".to_owned());
    let record = item_to_record(&item, HnFeed::Ask, json!({})).expect("record");

    assert_eq!(record.tags, vec!["story", "ask", "Ask HN"]);
    assert_eq!(
        record.description.as_deref(),
        Some("<i>or</i> HN: the Next Iteration")
    );
}

#[test]
fn show_and_tell_prefixes_are_case_insensitive() {
    let show = story(1, "show hn: a thing", None);
    let tell = story(2, "Tell HN: news", None);
    assert!(item_to_record(&show, HnFeed::Show, json!({}))
        .unwrap()
        .tags
        .contains(&"Show HN".to_owned()));
    assert!(item_to_record(&tell, HnFeed::New, json!({}))
        .unwrap()
        .tags
        .contains(&"Tell HN".to_owned()));
}

#[test]
fn deleted_dead_and_untitled_items_are_skipped() {
    let mut deleted = story(1, "x", None);
    deleted.deleted = true;
    let mut dead = story(2, "x", None);
    dead.dead = true;
    let untitled = story(3, "   ", None);

    assert!(item_to_record(&deleted, HnFeed::Top, json!({})).is_none());
    assert!(item_to_record(&dead, HnFeed::Top, json!({})).is_none());
    assert!(item_to_record(&untitled, HnFeed::Top, json!({})).is_none());
}

// -----------------------------------------------------------------------
// domain_of
// -----------------------------------------------------------------------

#[test]
fn domain_strips_www_and_lowercases() {
    assert_eq!(
        domain_of("https://WWW.Example.com/a?b=c").as_deref(),
        Some("example.com")
    );
    assert_eq!(
        domain_of("https://blog.rust-lang.org/x").as_deref(),
        Some("blog.rust-lang.org")
    );
}

#[test]
fn domain_of_invalid_url_is_none() {
    assert!(domain_of("not a url").is_none());
    assert!(domain_of("mailto:someone@example.com").is_none());
}
