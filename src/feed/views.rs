use crate::models::{Article, Category};

/// Articles shown for a category tab.
///
/// `All` is the identity view; callers apply [`sort_by_recency`] themselves.
/// `my_area` is the resolved device location, if any.
pub fn for_category(
    articles: &[Article],
    category: Category,
    my_area: Option<&str>,
    fallback_region: &str,
) -> Vec<Article> {
    match category {
        Category::All => articles.to_vec(),
        Category::Trending => trending(articles),
        Category::MyArea => match my_area {
            Some(location) => self::my_area(articles, location, fallback_region),
            None => Vec::new(),
        },
        other => articles
            .iter()
            .filter(|a| a.category == other)
            .cloned()
            .collect(),
    }
}

/// Descending by `views + likes * 5`. Ties keep their input order.
pub fn trending(articles: &[Article]) -> Vec<Article> {
    let mut sorted = articles.to_vec();
    sorted.sort_by(|a, b| b.trending_score().cmp(&a.trending_score()));
    sorted
}

/// Loose locality match: the article's location contains `location`, or it
/// is filed under Kolkata, or the device only resolved to the fallback region
/// and the article carries any location at all.
pub fn my_area(articles: &[Article], location: &str, fallback_region: &str) -> Vec<Article> {
    let broad = location == fallback_region;
    articles
        .iter()
        .filter(|a| {
            a.location.as_deref().is_some_and(|l| l.contains(location))
                || a.category == Category::Kolkata
                || (broad && a.location.is_some())
        })
        .cloned()
        .collect()
}

/// Case-insensitive substring search over headline, body and location.
pub fn search(articles: &[Article], query: &str) -> Vec<Article> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    articles
        .iter()
        .filter(|a| {
            a.headline.to_lowercase().contains(&query)
                || a.content.to_lowercase().contains(&query)
                || a.location
                    .as_deref()
                    .is_some_and(|l| l.to_lowercase().contains(&query))
        })
        .cloned()
        .collect()
}

/// Newest first by creation time.
pub fn sort_by_recency(articles: &mut [Article]) {
    articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Up to `limit` other articles from the same category, newest first.
pub fn related(articles: &[Article], article: &Article, limit: usize) -> Vec<Article> {
    let mut same: Vec<Article> = articles
        .iter()
        .filter(|a| a.category == article.category && a.id != article.id)
        .cloned()
        .collect();
    sort_by_recency(&mut same);
    same.truncate(limit);
    same
}

/// Lead story for the All and Breaking tabs: the newest article.
pub fn hero(articles: &[Article], category: Category) -> Option<&Article> {
    match category {
        Category::All | Category::Breaking => {
            articles.iter().fold(None, |best: Option<&Article>, a| match best {
                Some(b) if b.created_at >= a.created_at => Some(b),
                _ => Some(a),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, category: Category, location: Option<&str>) -> Article {
        Article {
            id: id.to_string(),
            headline: format!("headline {id}"),
            preview_text: String::new(),
            content: "body".to_string(),
            category,
            location: location.map(str::to_string),
            image_url: None,
            created_at: 0,
            read_time: None,
            views: 0,
            likes: 0,
            comments: Vec::new(),
            is_sponsored: None,
            affiliate: None,
        }
    }

    fn ids(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn trending_orders_by_weighted_score_and_is_stable() {
        let mut a = article("a", Category::State, None);
        a.views = 10;
        let mut b = article("b", Category::State, None);
        b.likes = 3;
        let mut c = article("c", Category::State, None);
        c.views = 5;
        c.likes = 1;

        let sorted = trending(&[a, b, c]);
        assert_eq!(ids(&sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn search_matches_location_only_article() {
        let articles = vec![
            article("1", Category::Districts, Some("Kolkata")),
            article("2", Category::Districts, Some("Siliguri")),
            article("3", Category::State, None),
        ];

        let found = search(&articles, "Kolkata");
        assert_eq!(ids(&found), vec!["1"]);

        let found = search(&articles, "kolKATA");
        assert_eq!(ids(&found), vec!["1"]);
    }

    #[test]
    fn search_covers_headline_and_body() {
        let mut with_body = article("b", Category::State, None);
        with_body.content = "মেট্রো চালু হলো".to_string();
        let articles = vec![article("h", Category::State, None), with_body];

        assert_eq!(ids(&search(&articles, "HEADLINE h")), vec!["h"]);
        assert_eq!(ids(&search(&articles, "মেট্রো")), vec!["b"]);
        assert!(search(&articles, "   ").is_empty());
    }

    #[test]
    fn my_area_three_way_match() {
        let articles = vec![
            article("near", Category::Districts, Some("North Barasat")),
            article("city", Category::Kolkata, None),
            article("far", Category::Districts, Some("Siliguri")),
            article("nowhere", Category::State, None),
        ];

        let local = my_area(&articles, "Barasat", "West Bengal");
        assert_eq!(ids(&local), vec!["near", "city"]);

        let broad = my_area(&articles, "West Bengal", "West Bengal");
        assert_eq!(ids(&broad), vec!["near", "city", "far"]);
    }

    #[test]
    fn category_views() {
        let articles = vec![
            article("1", Category::Kolkata, Some("Kolkata")),
            article("2", Category::Breaking, None),
            article("3", Category::Kolkata, None),
        ];

        let kolkata = for_category(&articles, Category::Kolkata, None, "West Bengal");
        assert_eq!(ids(&kolkata), vec!["1", "3"]);

        let all = for_category(&articles, Category::All, None, "West Bengal");
        assert_eq!(all, articles);

        assert!(for_category(&articles, Category::MyArea, None, "West Bengal").is_empty());
    }

    #[test]
    fn related_excludes_self_and_other_categories() {
        let mut articles = vec![
            article("1", Category::Kolkata, None),
            article("2", Category::Kolkata, None),
            article("3", Category::State, None),
            article("4", Category::Kolkata, None),
            article("5", Category::Kolkata, None),
            article("6", Category::Kolkata, None),
        ];
        for (i, a) in articles.iter_mut().enumerate() {
            a.created_at = i as i64;
        }

        let found = related(&articles, &articles[0], 3);
        assert_eq!(ids(&found), vec!["6", "5", "4"]);
    }

    #[test]
    fn hero_is_newest_on_all_and_breaking_only() {
        let mut old = article("old", Category::State, None);
        old.created_at = 1;
        let mut new = article("new", Category::State, None);
        new.created_at = 2;
        let articles = vec![old, new];

        assert_eq!(hero(&articles, Category::All).map(|a| a.id.as_str()), Some("new"));
        assert_eq!(hero(&articles, Category::Breaking).map(|a| a.id.as_str()), Some("new"));
        assert!(hero(&articles, Category::Kolkata).is_none());
    }
}
