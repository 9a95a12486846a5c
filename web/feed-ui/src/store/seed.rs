//! Mock posts shown on first load.

use crate::models::{Author, Comment, Post};
use chrono::{DateTime, Duration, Utc};

fn author(username: &str, avatar_url: &str) -> Author {
    Author {
        username: username.to_string(),
        avatar_url: avatar_url.to_string(),
    }
}

/// The three demo posts, timestamped relative to `now` (1h, 2h and 4h old)
pub fn demo_posts(now: DateTime<Utc>) -> Vec<Post> {
    vec![
        Post {
            id: 1,
            author: author(
                "johndoe",
                "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=100&h=100&fit=crop&crop=face",
            ),
            image_url: "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=600&h=600&fit=crop"
                .to_string(),
            caption: "Beautiful sunset at the mountains! 🌅 #nature #photography".to_string(),
            location: Some("Rocky Mountains".to_string()),
            like_count: 342,
            liked_by_viewer: false,
            comments: vec![
                Comment::new("jane_smith", "Absolutely stunning! 😍"),
                Comment::new("mike_photo", "Great composition!"),
                Comment::new("sarah_travels", "Adding this to my bucket list!"),
            ],
            created_at: now - Duration::hours(1),
        },
        Post {
            id: 2,
            author: author(
                "foodie_emma",
                "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=100&h=100&fit=crop&crop=face",
            ),
            image_url: "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=600&h=600&fit=crop"
                .to_string(),
            caption: "Homemade pizza night! 🍕 Recipe in my bio".to_string(),
            location: Some("Home Kitchen".to_string()),
            like_count: 89,
            liked_by_viewer: true,
            comments: vec![
                Comment::new("chef_marco", "Looks delicious!"),
                Comment::new("pizza_lover", "Recipe please! 🙏"),
            ],
            created_at: now - Duration::hours(2),
        },
        Post {
            id: 3,
            author: author(
                "fitness_alex",
                "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100&h=100&fit=crop&crop=face",
            ),
            image_url: "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=600&h=600&fit=crop"
                .to_string(),
            caption: "Morning workout done! 💪 #fitness #motivation #gymlife".to_string(),
            location: Some("Local Gym".to_string()),
            like_count: 156,
            liked_by_viewer: false,
            comments: vec![
                Comment::new("gym_buddy", "Keep it up! 🔥"),
                Comment::new("healthy_life", "Inspiring!"),
            ],
            created_at: now - Duration::hours(4),
        },
    ]
}
