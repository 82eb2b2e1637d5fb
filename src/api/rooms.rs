// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use serde_json::Value;

use crate::{
    gateway::Method,
    model::{Ack, CommentCreated, Comments, Participants, RoomEnvelope, Rooms, Votes},
};

use super::{json_body, segments, Endpoint};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateRoom {
    pub(crate) user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) room_name: Option<String>,
}

impl Endpoint for CreateRoom {
    type Response = RoomEnvelope;

    const METHOD: Method = Method::Post;

    fn segments(&self) -> Vec<String> {
        segments(["rooms", "create"])
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JoinRoom {
    pub(crate) user_id: String,
    pub(crate) invite_code: String,
}

impl Endpoint for JoinRoom {
    type Response = RoomEnvelope;

    const METHOD: Method = Method::Post;

    fn segments(&self) -> Vec<String> {
        segments(["rooms", "join"])
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

pub(crate) struct GetRoom {
    pub(crate) room_id: String,
}

impl Endpoint for GetRoom {
    type Response = RoomEnvelope;

    const METHOD: Method = Method::Get;

    fn segments(&self) -> Vec<String> {
        segments(["rooms", self.room_id.as_str()])
    }
}

pub(crate) struct ListUserRooms {
    pub(crate) user_id: String,
}

impl Endpoint for ListUserRooms {
    type Response = Rooms;

    const METHOD: Method = Method::Get;

    fn segments(&self) -> Vec<String> {
        segments(["rooms", "user", self.user_id.as_str()])
    }
}

pub(crate) struct ListRoomParticipants {
    pub(crate) room_id: String,
}

impl Endpoint for ListRoomParticipants {
    type Response = Participants;

    const METHOD: Method = Method::Get;

    fn segments(&self) -> Vec<String> {
        segments(["rooms", self.room_id.as_str(), "participants"])
    }
}

pub(crate) struct ListRoomComments {
    pub(crate) room_id: String,
}

impl Endpoint for ListRoomComments {
    type Response = Comments;

    const METHOD: Method = Method::Get;

    fn segments(&self) -> Vec<String> {
        segments(["rooms", self.room_id.as_str(), "comments"])
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateRoomComment {
    #[serde(skip)]
    pub(crate) room_id: String,
    pub(crate) user_id: String,
    pub(crate) content: String,
}

impl Endpoint for CreateRoomComment {
    type Response = CommentCreated;

    const METHOD: Method = Method::Post;

    fn segments(&self) -> Vec<String> {
        segments(["rooms", self.room_id.as_str(), "comments"])
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

pub(crate) struct ListRoomVotes {
    pub(crate) room_id: String,
}

impl Endpoint for ListRoomVotes {
    type Response = Votes;

    const METHOD: Method = Method::Get;

    fn segments(&self) -> Vec<String> {
        segments(["rooms", self.room_id.as_str(), "votes"])
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateRoomVote {
    #[serde(skip)]
    pub(crate) room_id: String,
    pub(crate) user_id: String,
    pub(crate) trip_id: String,
}

impl Endpoint for CreateRoomVote {
    type Response = Ack;

    const METHOD: Method = Method::Post;

    fn segments(&self) -> Vec<String> {
        segments(["rooms", self.room_id.as_str(), "votes"])
    }

    fn body(&self) -> serde_json::Result<Option<Value>> {
        json_body(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::{
        api::Executor as _,
        error::Result,
        gateway::{
            tests::{gateway, logged_in, Scripted},
            Profile,
        },
        storage::Memory,
    };

    fn room() -> Value {
        json!({
            "id": "r1",
            "name": "가족 여행",
            "inviteCode": "ABC123",
            "inviteLink": "gentrip://join/ABC123",
            "participants": ["u1"],
            "createdAt": "2026-10-01T00:00:00Z",
        })
    }

    #[tokio::test]
    async fn create_then_join() -> Result<()> {
        let session = logged_in(Memory::new()).await?;
        let transport = Arc::new(
            Scripted::default()
                .answer(200, json!({"success": true, "room": room()}))
                .answer(200, json!({"success": true, "room": room()})),
        );
        let rooms = gateway(Profile::ROOMS, &transport, &session);

        let created = CreateRoom {
            user_id: "u1".to_owned(),
            room_name: None,
        }
        .execute(&rooms)
        .await?;
        assert_eq!(created.room.invite_code, "ABC123");

        let joined = JoinRoom {
            user_id: "u2".to_owned(),
            invite_code: "ABC123".to_owned(),
        }
        .execute(&rooms)
        .await?;
        assert_eq!(joined.room.id, "r1");

        let sent = transport.sent();
        assert_eq!(sent[0].body, Some(json!({"userId": "u1"})));
        assert_eq!(
            sent[1].body,
            Some(json!({"userId": "u2", "inviteCode": "ABC123"}))
        );
        Ok(())
    }

    #[tokio::test]
    async fn comment_and_vote_bodies_exclude_room_id() -> Result<()> {
        let session = logged_in(Memory::new()).await?;
        let transport = Arc::new(
            Scripted::default()
                .answer(
                    200,
                    json!({"comment": {"id": "c1", "userName": "A", "content": "좋아요", "createdAt": "now"}}),
                )
                .answer(200, json!({"success": true}))
                .answer(200, json!({"votes": {"t1": 2}})),
        );
        let rooms = gateway(Profile::ROOMS, &transport, &session);

        let created = CreateRoomComment {
            room_id: "r1".to_owned(),
            user_id: "u1".to_owned(),
            content: "좋아요".to_owned(),
        }
        .execute(&rooms)
        .await?;
        assert_eq!(created.comment.user_name, "A");

        let _ = CreateRoomVote {
            room_id: "r1".to_owned(),
            user_id: "u1".to_owned(),
            trip_id: "t1".to_owned(),
        }
        .execute(&rooms)
        .await?;

        let votes = ListRoomVotes {
            room_id: "r1".to_owned(),
        }
        .execute(&rooms)
        .await?;
        assert_eq!(votes.votes.get("t1"), Some(&2));

        let sent = transport.sent();
        assert_eq!(sent[0].path, "/api/rooms/r1/comments");
        assert_eq!(sent[0].body, Some(json!({"userId": "u1", "content": "좋아요"})));
        assert_eq!(sent[1].path, "/api/rooms/r1/votes");
        assert_eq!(sent[1].body, Some(json!({"userId": "u1", "tripId": "t1"})));
        assert_eq!((sent[2].method, sent[2].body.clone()), (Method::Get, None));
        Ok(())
    }

    #[tokio::test]
    async fn empty_listings_default() -> Result<()> {
        let session = logged_in(Memory::new()).await?;
        let transport = Arc::new(
            Scripted::default()
                .answer(200, json!({}))
                .answer(200, json!({})),
        );
        let rooms = gateway(Profile::ROOMS, &transport, &session);

        let comments = ListRoomComments {
            room_id: "r1".to_owned(),
        }
        .execute(&rooms)
        .await?;
        let participants = ListRoomParticipants {
            room_id: "r1".to_owned(),
        }
        .execute(&rooms)
        .await?;

        assert!(comments.comments.is_empty());
        assert!(participants.participants.is_empty());
        Ok(())
    }
}
