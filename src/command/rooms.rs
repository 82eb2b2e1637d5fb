// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use log::warn;

use crate::{
    api::{rooms, Executor as _},
    error::Result,
    model::Room,
};

use super::{print_table, Context};

#[derive(Debug, Subcommand)]
enum Action {
    /// Create a room and print its invite code.
    Create {
        /// A name for the room.
        #[arg(long, short)]
        name: Option<String>,
    },
    /// Join a room with an invite code.
    Join {
        #[clap()]
        invite_code: String,
    },
    /// Show a room.
    Show {
        #[clap()]
        room_id: String,
    },
    /// List the rooms you belong to.
    List,
    /// List the participants of a room.
    Participants {
        #[clap()]
        room_id: String,
    },
    /// Show the comments left in a room.
    Comments {
        #[clap()]
        room_id: String,
    },
    /// Leave a comment in a room.
    Comment {
        #[clap()]
        room_id: String,

        #[clap()]
        content: String,
    },
    /// Show the vote tally for a room.
    Votes {
        #[clap()]
        room_id: String,
    },
    /// Vote for a trip in a room.
    Vote {
        #[clap()]
        room_id: String,

        #[clap()]
        trip_id: String,
    },
}

/// Plan trips together in shared rooms.
#[derive(Debug, Parser)]
pub(crate) struct Rooms {
    #[command(subcommand)]
    action: Action,
}

fn print_room(room: Room) {
    if !room.invite_link.is_empty() {
        println!("Invite: {}", room.invite_link);
    }
    print_table([room]);
}

#[async_trait]
impl super::Command for Rooms {
    async fn execute(self, ctx: &Context) -> Result<()> {
        let user_id = ctx.clients.session.require_identity().await?.id;
        let gateway = &ctx.clients.rooms;

        match self.action {
            Action::Create { name } => {
                let created = rooms::CreateRoom {
                    user_id,
                    room_name: name,
                }
                .execute(gateway)
                .await?;
                print_room(created.room);
            }
            Action::Join { invite_code } => {
                let joined = rooms::JoinRoom {
                    user_id,
                    invite_code,
                }
                .execute(gateway)
                .await?;
                print_room(joined.room);
            }
            Action::Show { room_id } => {
                let room = rooms::GetRoom { room_id }.execute(gateway).await?;
                print_room(room.room);
            }
            Action::List => {
                let list = rooms::ListUserRooms { user_id }.execute(gateway).await?;
                if list.rooms.is_empty() {
                    println!("You are not in any rooms.");
                } else {
                    print_table(list.rooms);
                }
            }
            Action::Participants { room_id } => {
                let list = rooms::ListRoomParticipants { room_id }
                    .execute(gateway)
                    .await?;
                for participant in list.participants {
                    match participant.as_str() {
                        Some(id) => println!("{id}"),
                        None => println!("{participant}"),
                    }
                }
            }
            Action::Comments { room_id } => {
                let list = rooms::ListRoomComments { room_id }
                    .execute(gateway)
                    .await?;
                if list.comments.is_empty() {
                    println!("No comments yet.");
                } else {
                    print_table(list.comments);
                }
            }
            Action::Comment { room_id, content } => {
                let created = rooms::CreateRoomComment {
                    room_id,
                    user_id,
                    content,
                }
                .execute(gateway)
                .await?;
                print_table([created.comment]);
            }
            Action::Votes { room_id } => {
                let tally = rooms::ListRoomVotes { room_id }.execute(gateway).await?;
                let mut votes: Vec<_> = tally.votes.into_iter().collect();
                votes.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
                for (trip_id, count) in votes {
                    println!("{count:>4}  {trip_id}");
                }
            }
            Action::Vote { room_id, trip_id } => {
                let ack = rooms::CreateRoomVote {
                    room_id,
                    user_id,
                    trip_id,
                }
                .execute(gateway)
                .await?;
                if !ack.success {
                    warn!("The backend did not confirm the vote");
                }
            }
        }
        Ok(())
    }
}
