use crate::editor::image_url_for_prompt;
use crate::models::{Affiliate, Article, Category};

struct Sample {
    id: &'static str,
    headline: &'static str,
    preview: &'static str,
    content: &'static str,
    category: Category,
    location: &'static str,
    image_prompt: &'static str,
    age_ms: i64,
    read_time: &'static str,
    views: u64,
}

const SAMPLES: [Sample; 7] = [
    Sample {
        id: "1",
        headline: "নিউ টাউনে নতুন মেট্রো স্টেশনের উদ্বোধন করলেন মুখ্যমন্ত্রী",
        preview: "যাত্রীদের দীর্ঘদিনের অপেক্ষার অবসান ঘটিয়ে অবশেষে চালু হলো নতুন রুট...",
        content: "দীর্ঘ প্রতীক্ষার পর অবশেষে নিউ টাউন বাসীদের জন্য সুখবর। আজ সকালে মাননীয়া মুখ্যমন্ত্রী নতুন মেট্রো স্টেশনের উদ্বোধন করলেন।",
        category: Category::Kolkata,
        location: "New Town",
        image_prompt: "Kolkata Metro Station Inauguration crowd ribbon cutting photorealistic",
        age_ms: 120_000,
        read_time: "3 min",
        views: 1205,
    },
    Sample {
        id: "2",
        headline: "মুর্শিদাবাদে ঐতিহাসিক পর্যটন কেন্দ্রে পর্যটকদের ভিড়",
        preview: "শীতের মরসুমে হাজার হাজার মানুষ ভিড় জমিয়েছেন হাজারদুয়ারিতে...",
        content: "মুর্শিদাবাদের হাজারদুয়ারি প্যালেসে এই বছর রেকর্ড সংখ্যক পর্যটক এসেছেন। স্থানীয় ব্যবসায়ীদের মুখে হাসি ফুটেছে।",
        category: Category::Districts,
        location: "Murshidabad",
        image_prompt: "Hazarduari Palace Murshidabad historic india building sunny day tourists",
        age_ms: 300_000,
        read_time: "4 min",
        views: 850,
    },
    Sample {
        id: "3",
        headline: "দার্জিলিং-এ তুষারপাতের সম্ভাবনা, পর্যটকদের জন্য সুখবর",
        preview: "আবহাওয়া দপ্তরের পূর্বাভাস অনুযায়ী আগামী কাল থেকেই নামতে পারে তাপমাত্রা...",
        content: "উত্তরবঙ্গের পাহাড়ি এলাকাগুলিতে তাপমাত্রার পারদ নামছে। সান্দাকফুতে হালকা তুষারপাতের খবর পাওয়া গেছে।",
        category: Category::Districts,
        location: "Darjeeling",
        image_prompt: "Darjeeling tea garden snow mountain kanchenjunga view",
        age_ms: 600_000,
        read_time: "2 min",
        views: 3400,
    },
    Sample {
        id: "4",
        headline: "রাজ্যজুড়ে শুরু হচ্ছে \"দুয়ারে সরকার\" ক্যাম্প",
        preview: "আগামী ১লা তারিখ থেকে রাজ্যের প্রতিটি ব্লকে বসবে ক্যাম্প...",
        content: "রাজ্য সরকারের উদ্যোগে আবারও শুরু হচ্ছে দুয়ারে সরকার কর্মসূচি। লক্ষ্মীর ভাণ্ডার সহ একাধিক প্রকল্পের সুবিধা পাওয়া যাবে।",
        category: Category::State,
        location: "West Bengal",
        image_prompt: "West Bengal government official camp village crowd india",
        age_ms: 900_000,
        read_time: "5 min",
        views: 920,
    },
    Sample {
        id: "5",
        headline: "কলকাতায় আজ বিকেলে কালবৈশাখীর পূর্বাভাস",
        preview: "আলিপুর আবহাওয়া দপ্তরের সতর্কবার্তা, উপকূলবর্তী এলাকায় জলোচ্ছ্বাস...",
        content: "গরমের দাবদাহ থেকে কিছুটা স্বস্তি মিলতে পারে আজ বিকেলেই। আলিপুর আবহাওয়া দপ্তর জানিয়েছে।",
        category: Category::Kolkata,
        location: "Kolkata",
        image_prompt: "Kolkata city street rain storm dark clouds victoria memorial",
        age_ms: 1_200_000,
        read_time: "2 min",
        views: 1500,
    },
    Sample {
        id: "6",
        headline: "সেন ব্রাদার্স মিষ্টান্ন ভাণ্ডারে পুজো স্পেশাল ছাড়!",
        preview: "এই পুজোয় মিষ্টি প্রেমীদের জন্য সুখবর। সেন ব্রাদার্স নিয়ে এলো নতুন স্বাদের সন্দেশ...",
        content: "সেন ব্রাদার্স মিষ্টান্ন ভাণ্ডার উত্তর কলকাতার একটি ঐতিহ্যবাহী দোকান। এবারের পুজোয় তারা নিয়ে এসেছে অভিনব চকোলেট সন্দেশ এবং ম্যাঙ্গো দই।",
        category: Category::Kolkata,
        location: "Kolkata",
        image_prompt: "Bengali sweets shop display rosogolla sandesh",
        age_ms: 1_500_000,
        read_time: "1 min",
        views: 5000,
    },
    Sample {
        id: "7",
        headline: "গরমের সেরা ৫টি এসি - দাম এবং ফিচার",
        preview: "এই গরমে কোন এসি কিনবেন ভাবছেন? দেখে নিন আমাদের বাছাই করা সেরা ৫টি মডেলের তালিকা...",
        content: "গরমের তীব্রতা বাড়ার সাথে সাথে এসির চাহিদাও বাড়ছে। আজকের প্রতিবেদনে আমরা আলোচনা করব ভোল্টাস এবং এলজি-র নতুন মডেলগুলি নিয়ে যা বিদ্যুৎ সাশ্রয়ী এবং দ্রুত ঠান্ডা করে।",
        category: Category::State,
        location: "West Bengal",
        image_prompt: "Modern living room air conditioner wall cool blue light",
        age_ms: 1_800_000,
        read_time: "5 min",
        views: 2300,
    },
];

/// Built-in articles used to seed an empty store. Timestamps are relative to `now`.
pub fn sample_articles(now: i64) -> Vec<Article> {
    SAMPLES
        .iter()
        .map(|s| Article {
            id: s.id.to_string(),
            headline: s.headline.to_string(),
            preview_text: s.preview.to_string(),
            content: s.content.to_string(),
            category: s.category,
            location: Some(s.location.to_string()),
            image_url: Some(image_url_for_prompt(s.image_prompt)),
            created_at: now - s.age_ms,
            read_time: Some(s.read_time.to_string()),
            views: s.views,
            likes: 0,
            comments: Vec::new(),
            is_sponsored: (s.id == "6").then_some(true),
            affiliate: (s.id == "7").then(|| Affiliate {
                link: "https://amazon.in".to_string(),
                text: "Check Best Price on Amazon".to_string(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_have_unique_ids_and_newest_first() {
        let articles = sample_articles(10_000_000);
        let ids: std::collections::HashSet<_> = articles.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), 7);

        assert!(articles
            .windows(2)
            .all(|w| w[0].created_at > w[1].created_at));
        assert!(articles[5].sponsored());
        assert!(articles[6].affiliate.is_some());
        assert!(articles[0]
            .image_url
            .as_deref()
            .unwrap()
            .contains("Kolkata%20Metro"));
    }
}
